//! Calls the public NumberConversion SOAP service and prints the result.
//!
//! Run with: `cargo run --example number_to_words -- 42`

use std::time::Duration;

use bevy_reflect::Reflect;
use serde::{Deserialize, Serialize};

use soapclient::Client;

#[derive(Serialize, Reflect)]
#[serde(rename = "NumberToWords")]
struct NumberToWords {
    #[serde(rename = "@xmlns")]
    xmlns: String,
    #[serde(rename = "ubiNum")]
    number: u64,
}

#[derive(Debug, Deserialize)]
struct NumberToWordsBody {
    #[serde(rename = "m:NumberToWordsResponse")]
    response: NumberToWordsResponse,
}

#[derive(Debug, Deserialize)]
struct NumberToWordsResponse {
    #[serde(rename = "m:NumberToWordsResult")]
    result: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let number: u64 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "42".to_string())
        .parse()?;

    let mut client = Client::new(
        "https://www.dataaccess.com/webservicesserver/NumberConversion.wso",
        "http://www.dataaccess.com/webservicesserver/",
    );
    // This service dispatches on the body element, not on SOAPAction.
    client.exclude_action_namespace = true;
    client.timeout = Some(Duration::from_secs(10));

    let mut request = NumberToWords {
        xmlns: "http://www.dataaccess.com/webservicesserver/".to_string(),
        number,
    };
    let body: NumberToWordsBody = client.round_trip_with_action("NumberToWords", &mut request)?;
    println!("{} => {}", number, body.response.result.trim());
    Ok(())
}
