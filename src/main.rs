//! metadv binary entry point.

use metadv::ui::output;

fn main() {
    if let Err(e) = metadv::cli::run() {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
