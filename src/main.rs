#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    event_admin::run().await
}
