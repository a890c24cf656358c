//! IPv4 network planning types.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, ConfigResult};

/// An IPv4 address block in CIDR notation.
///
/// The stored address is always the canonical network address: host bits
/// of the input are masked off on construction, so `10.0.1.5/16` and
/// `10.0.0.0/16` describe the same block.
///
/// # Examples
///
/// ```rust
/// use cirrus_config::Cidr;
///
/// let vnet: Cidr = "10.0.0.0/16".parse().unwrap();
/// let subnet: Cidr = "10.0.1.0/24".parse().unwrap();
/// assert!(vnet.contains(&subnet));
/// assert_eq!(vnet.to_string(), "10.0.0.0/16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    network: Ipv4Addr,
    prefix: u8,
}

impl Cidr {
    /// Create a block from an address and prefix length.
    pub fn new(address: Ipv4Addr, prefix: u8) -> ConfigResult<Self> {
        if prefix > 32 {
            return Err(ConfigError::InvalidPrefixLength(prefix));
        }
        let network = Ipv4Addr::from(u32::from(address) & Self::mask(prefix));
        Ok(Self { network, prefix })
    }

    fn mask(prefix: u8) -> u32 {
        if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - prefix)
        }
    }

    /// The canonical network address (first address of the block).
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// The last address of the block.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) | !Self::mask(self.prefix))
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix
    }

    /// Whether `other` lies entirely within this block.
    pub fn contains(&self, other: &Cidr) -> bool {
        u32::from(self.network()) <= u32::from(other.network())
            && u32::from(other.broadcast()) <= u32::from(self.broadcast())
    }

    /// Whether the two blocks share any address.
    pub fn overlaps(&self, other: &Cidr) -> bool {
        u32::from(self.network()) <= u32::from(other.broadcast())
            && u32::from(other.network()) <= u32::from(self.broadcast())
    }
}

impl FromStr for Cidr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, prefix_str) = s
            .split_once('/')
            .ok_or_else(|| ConfigError::InvalidCidr(s.to_string()))?;

        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| ConfigError::InvalidCidr(s.to_string()))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidCidr(s.to_string()))?;

        Self::new(address, prefix)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl Serialize for Cidr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Network configuration for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// VNet address space
    pub address_space: Cidr,
    /// Named subnet address prefixes
    pub subnets: BTreeMap<String, Cidr>,
    /// Whether DDoS protection is provisioned
    pub enable_ddos_protection: bool,
    /// Whether an Azure Firewall is provisioned
    pub enable_firewall: bool,
}

impl NetworkSettings {
    pub fn new(address_space: Cidr) -> Self {
        Self {
            address_space,
            subnets: BTreeMap::new(),
            enable_ddos_protection: false,
            enable_firewall: false,
        }
    }

    pub fn with_subnet(mut self, name: impl Into<String>, prefix: Cidr) -> Self {
        self.subnets.insert(name.into(), prefix);
        self
    }

    pub fn with_ddos_protection(mut self, enabled: bool) -> Self {
        self.enable_ddos_protection = enabled;
        self
    }

    pub fn with_firewall(mut self, enabled: bool) -> Self {
        self.enable_firewall = enabled;
        self
    }

    /// Check the subnet plan against the VNet address space.
    ///
    /// Every subnet must lie inside the address space and no two
    /// subnets may overlap.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, prefix) in &self.subnets {
            if !self.address_space.contains(prefix) {
                return Err(ConfigError::SubnetOutsideVnet {
                    subnet: name.clone(),
                    cidr: prefix.to_string(),
                    vnet: self.address_space.to_string(),
                });
            }
        }

        let entries: Vec<_> = self.subnets.iter().collect();
        for (i, (first, first_prefix)) in entries.iter().enumerate() {
            for (second, second_prefix) in entries.iter().skip(i + 1) {
                if first_prefix.overlaps(second_prefix) {
                    return Err(ConfigError::SubnetOverlap {
                        first: (*first).clone(),
                        second: (*second).clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Cidr {
        s.parse().unwrap()
    }

    #[test]
    fn test_cidr_parse_and_display() {
        let block = cidr("10.1.0.0/16");
        assert_eq!(block.prefix_len(), 16);
        assert_eq!(block.network(), Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(block.to_string(), "10.1.0.0/16");
    }

    #[test]
    fn test_cidr_canonicalizes_host_bits() {
        assert_eq!(cidr("10.0.3.7/16"), cidr("10.0.0.0/16"));
        assert_eq!(cidr("10.0.3.7/16").to_string(), "10.0.0.0/16");
    }

    #[test]
    fn test_cidr_rejects_malformed_input() {
        assert!("10.0.0.0".parse::<Cidr>().is_err());
        assert!("10.0.0/16".parse::<Cidr>().is_err());
        assert!("300.0.0.0/16".parse::<Cidr>().is_err());
        assert!("10.0.0.0/33".parse::<Cidr>().is_err());
        assert!("10.0.0.0/x".parse::<Cidr>().is_err());
    }

    #[test]
    fn test_cidr_broadcast() {
        assert_eq!(cidr("10.2.0.0/16").broadcast(), Ipv4Addr::new(10, 2, 255, 255));
        assert_eq!(cidr("10.0.1.0/24").broadcast(), Ipv4Addr::new(10, 0, 1, 255));
    }

    #[test]
    fn test_cidr_containment() {
        let vnet = cidr("10.0.0.0/16");
        assert!(vnet.contains(&cidr("10.0.4.0/24")));
        assert!(vnet.contains(&vnet));
        assert!(!vnet.contains(&cidr("10.1.0.0/24")));
        assert!(!cidr("10.0.4.0/24").contains(&vnet));
    }

    #[test]
    fn test_cidr_overlap() {
        assert!(cidr("10.0.0.0/16").overlaps(&cidr("10.0.128.0/17")));
        assert!(cidr("10.0.0.0/16").overlaps(&cidr("10.0.0.0/8")));
        assert!(!cidr("10.0.0.0/16").overlaps(&cidr("10.1.0.0/16")));
    }

    #[test]
    fn test_cidr_serde_round_trip() {
        let block = cidr("10.3.0.0/16");
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, "\"10.3.0.0/16\"");
        let parsed: Cidr = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn test_network_settings_valid_plan() {
        let network = NetworkSettings::new(cidr("10.0.0.0/16"))
            .with_subnet("web", cidr("10.0.1.0/24"))
            .with_subnet("app", cidr("10.0.2.0/24"));

        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_network_settings_subnet_outside_vnet() {
        let network =
            NetworkSettings::new(cidr("10.0.0.0/16")).with_subnet("rogue", cidr("10.9.0.0/24"));

        let err = network.validate().unwrap_err();
        assert!(matches!(err, ConfigError::SubnetOutsideVnet { .. }));
    }

    #[test]
    fn test_network_settings_overlapping_subnets() {
        let network = NetworkSettings::new(cidr("10.0.0.0/16"))
            .with_subnet("wide", cidr("10.0.0.0/23"))
            .with_subnet("web", cidr("10.0.1.0/24"));

        let err = network.validate().unwrap_err();
        assert!(matches!(err, ConfigError::SubnetOverlap { .. }));
    }
}
