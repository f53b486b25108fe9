//! Ases Kahraba Backend - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    if let Err(e) = aseskahraba_backend::run().await {
        eprintln!("aseskahraba-backend: {e}");
        std::process::exit(1);
    }
}
