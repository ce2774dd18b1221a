use std::io;

use zenziva::{Config, SendOutcome, ZenzivaClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phone = std::env::var("ZENZIVA_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "ZENZIVA_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("ZENZIVA_MESSAGE")
        .unwrap_or_else(|_| "Hello from the zenziva example.".to_owned());

    // ZENZIVA_USERKEY / ZENZIVA_PASSKEY are checked when the request is built.
    let mut client = ZenzivaClient::new(Config::from_env())?;

    match client.send(phone, message).await? {
        SendOutcome::Sent(result) => println!(
            "id: {}, status: {}, text: {}, balance: {}",
            result.id, result.status, result.message, result.balance
        ),
        SendOutcome::Failed => {
            for record in client.errors() {
                eprintln!("error: {record}");
            }
        }
    }

    Ok(())
}
