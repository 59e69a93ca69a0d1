use suite_builder::app_config::AppConfig;
use suite_builder::Error;

fn main() {
    // clap reports --debug/--quiet conflicts itself and exits with status 2
    let config = AppConfig::new();

    if let Err(e) = suite_builder::run(&config) {
        log::error!("Application error: {}", e);
        match &e {
            Error::Usage(msg) => eprintln!("Error: Invalid arguments: {}", msg),
            Error::UnsafeClean(path) => eprintln!("Error: Refusing to clean {:?}: it is a filesystem root", path),
            Error::MissingCache(path) => eprintln!("Error: Cannot reconfigure, {:?} not found. Run with --action cmake first.", path),
            Error::OptionsParse(msg) => eprintln!("Error: CMake options file is invalid: {}", msg),
            Error::ToolchainNotFound(msg) => eprintln!("Error: Build tools unavailable: {}", msg),
            Error::Subprocess(msg) => eprintln!("Error: External command execution failed: {}", msg),
            Error::Settings(msg) => eprintln!("Error: Settings file issue: {}", msg),
            Error::Io(io_err) => eprintln!("Error: A file system I/O error occurred: {}", io_err),
            Error::FileSystem(msg) => eprintln!("Error: File system operation failed: {}", msg),
        }
        std::process::exit(e.exit_code());
    }
}
