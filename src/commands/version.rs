//! Version command

use bizpulse::output::OutputMode;

/// Print the version
pub fn version(mode: OutputMode) {
    if mode == OutputMode::Json {
        println!("{}", serde_json::json!({ "version": bizpulse::VERSION }));
    } else {
        println!("bizpulse v{}", bizpulse::VERSION);
    }
}
