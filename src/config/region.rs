//! Service regions and their default hosts.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Deployment region of the recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    Unknown,
    Cn,
    Sg,
    Us,
    Air,
}

const CN_HOSTS: &[&str] = &["rec-b.volcengineapi.com", "rec.volcengineapi.com"];
const SG_HOSTS: &[&str] = &["rec-ap-singapore-1.byteplusapi.com"];
const US_HOSTS: &[&str] = &["rec-us-east-1.byteplusapi.com"];
const AIR_HOSTS: &[&str] = &["byteair-api-cn1.snssdk.com"];

impl Region {
    /// Hosts used when none are configured explicitly, in priority order.
    pub fn default_hosts(&self) -> Vec<String> {
        let hosts = match self {
            Region::Cn => CN_HOSTS,
            Region::Sg => SG_HOSTS,
            Region::Us => US_HOSTS,
            Region::Air => AIR_HOSTS,
            Region::Unknown => &[],
        };
        hosts.iter().map(|h| h.to_string()).collect()
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cn" => Ok(Region::Cn),
            "sg" => Ok(Region::Sg),
            "us" => Ok(Region::Us),
            "air" => Ok(Region::Air),
            _ => Err(format!("Invalid region: {}", s)),
        }
    }
}
