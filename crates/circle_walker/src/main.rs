#[tokio::main]
async fn main() {
    lib_circle_walker::init().await;
}
