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
    let code = std::env::var("ZENZIVA_OTP_CODE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "ZENZIVA_OTP_CODE environment variable is required",
        )
    })?;

    let mut client = ZenzivaClient::new(Config::from_env())?;
    let outcome = client.send_otp(phone, code).await?;

    if let SendOutcome::Sent(result) = outcome {
        println!("id: {}, balance: {}", result.id, result.balance);
    } else if let Some(record) = client.last_error() {
        eprintln!(
            "error: {record} ({})",
            record.description().unwrap_or("unknown status")
        );
    }

    Ok(())
}
