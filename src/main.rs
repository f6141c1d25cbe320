fn main() {
    // Run the CLI and forward its status to the shell
    std::process::exit(pagewright::cli::run());
}
