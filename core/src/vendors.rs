use std::sync::OnceLock;

use assetr_common::ports::vendor_repository::VendorRepository;
use mac_oui::Oui;
use tracing::warn;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("failed to load OUI database, vendor lookup disabled: {e}");
                None
            }
        })
        .as_ref()
}

/// Vendor lookup backed by the OUI database bundled with `mac_oui`.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac_addr: &str) -> Option<String> {
        let db = get_oui_db()?;
        let mac_str = mac_addr.trim().replace('-', ":").to_lowercase();
        match db.lookup_by_mac(&mac_str) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}
