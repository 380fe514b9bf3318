use super::*;

fn os(key: &str, value: &str) -> (OsString, OsString) {
    (OsString::from(key), OsString::from(value))
}

#[test]
fn display_joins_name_and_args() {
    let spec = CommandSpec::new("apt-get").args(["install", "-y", "-q", "curl"]);
    assert_eq!(spec.to_string(), "apt-get install -y -q curl");
}

#[test]
fn new_spec_inherits_environment_by_default() {
    let spec = CommandSpec::new("dnf");
    assert!(spec.inherit_env);
    assert!(spec.args.is_empty());
    assert!(spec.env_vars.is_empty());
}

#[test]
fn explicit_vars_come_first_when_inheriting() {
    let env = compose_environment(
        &["DEBIAN_FRONTEND=noninteractive".to_string()],
        true,
        vec![os("PATH", "/usr/bin"), os("HOME", "/root")],
    )
    .unwrap();

    assert_eq!(
        env,
        vec![
            os("DEBIAN_FRONTEND", "noninteractive"),
            os("PATH", "/usr/bin"),
            os("HOME", "/root"),
        ]
    );
}

#[test]
fn explicit_vars_shadow_inherited_ones() {
    let env = compose_environment(
        &["LANG=C".to_string()],
        true,
        vec![os("LANG", "en_US.UTF-8"), os("TERM", "xterm")],
    )
    .unwrap();

    assert_eq!(env, vec![os("LANG", "C"), os("TERM", "xterm")]);
}

#[test]
fn bare_environment_without_inheritance() {
    let env = compose_environment(&[], false, vec![os("PATH", "/usr/bin")]).unwrap();
    assert!(env.is_empty());
}

#[test]
fn value_may_contain_equals_or_be_empty() {
    let env = compose_environment(
        &["OPTS=a=b".to_string(), "EMPTY=".to_string()],
        false,
        Vec::new(),
    )
    .unwrap();

    assert_eq!(env, vec![os("OPTS", "a=b"), os("EMPTY", "")]);
}

#[test]
fn malformed_pairs_are_rejected() {
    for bad in ["NOEQUALS", "=value"] {
        let err = compose_environment(&[bad.to_string()], true, Vec::new()).unwrap_err();
        assert!(matches!(err, HostkitError::InvalidEnvVar(ref v) if v == bad));
    }
}
