use super::*;
use crate::exec::RecordingRunner;
use crate::utils::fs::OsFileSystem;

fn release(id: &str, id_like: &[&str], version: &str) -> OsRelease {
    OsRelease {
        id: id.to_string(),
        id_like: id_like.iter().map(|s| s.to_string()).collect(),
        version_id: version.to_string(),
        pretty_name: None,
    }
}

fn local(release: &OsRelease, arch: &str) -> Result<LocalSystem> {
    LocalSystem::from_os_release(
        release,
        arch,
        Arc::new(RecordingRunner::new()),
        Arc::new(OsFileSystem),
    )
}

#[test]
fn debian_family_gets_apt() {
    let system = local(&release("ubuntu", &["debian"], "22.04"), "x86_64").unwrap();

    assert_eq!(system.vendor, Vendor::Ubuntu);
    assert_eq!(system.version, "22.04");
    assert_eq!(system.package_manager().bin(), "apt-get");
    assert_eq!(system.package_arch(), "amd64");
}

#[test]
fn rhel_family_gets_dnf() {
    for id in ["rhel", "rocky", "almalinux", "centos", "fedora", "amzn"] {
        let system = local(&release(id, &[], "9"), "aarch64").unwrap();
        assert_eq!(system.package_manager().bin(), "dnf", "{id}");
        assert_eq!(system.package_arch(), "aarch64");
    }
}

#[test]
fn unknown_id_falls_back_to_id_like() {
    let system = local(&release("linuxmint", &["ubuntu", "debian"], "21.3"), "x86_64").unwrap();
    assert_eq!(system.vendor, Vendor::Ubuntu);

    let system = local(&release("ol", &["fedora"], "9.4"), "x86_64").unwrap();
    assert_eq!(system.vendor, Vendor::Fedora);
}

#[test]
fn unsupported_distribution_is_an_error() {
    let err = local(&release("arch", &[], ""), "x86_64").err().unwrap();
    assert!(matches!(err, HostkitError::UnsupportedDistribution(_)));
    assert!(err.to_string().contains("arch"));
}

#[test]
fn package_arch_naming() {
    assert_eq!(package_arch(PackageFamily::Apt, "aarch64"), "arm64");
    assert_eq!(package_arch(PackageFamily::Dnf, "x86_64"), "x86_64");
    assert_eq!(package_arch(PackageFamily::Apt, "riscv64"), "riscv64");
}

#[test]
fn summary_reports_backend_identity() {
    let system = local(&release("debian", &[], "12"), "x86_64").unwrap();
    let summary = system.summary();

    assert_eq!(summary.bin, "apt-get");
    assert_eq!(summary.package_extension, ".deb");
    assert_eq!(summary.family, PackageFamily::Apt);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["vendor"], "debian");
    assert_eq!(json["family"], "apt");
}
