/// Defines the contract for resolving device manufacturers from MAC addresses.
pub trait VendorRepository: Send + Sync {
    /// Retrieves the vendor name for a given MAC address.
    ///
    /// # Arguments
    /// * `mac_addr` - The MAC address to lookup, in any common textual notation.
    ///
    /// # Returns
    /// * `Some(String)` - The name of the vendor if found.
    /// * `None` - If the OUI is unknown or the address is malformed.
    fn get_vendor(&self, mac_addr: &str) -> Option<String>;
}
