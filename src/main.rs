fn main() {
    hostkit::run_cli();
}
