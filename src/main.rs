fn main() {
    scoopdesk::run_cli();
}
