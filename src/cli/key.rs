use anyhow::Result;

use crate::push::url_base64_to_bytes;

pub fn run(key: &str) -> Result<()> {
    let bytes = url_base64_to_bytes(key.trim())?;
    let hex = bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join("");
    println!("{} bytes: {}", bytes.len(), hex);
    Ok(())
}
