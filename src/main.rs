fn main() {
    #[cfg(feature = "cli")]
    oxiz85::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("oxiz85: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
