#![allow(dead_code)]

use teleindex_catalog::domain::item::CatalogItem;
use teleindex_catalog::domain::types::ItemId;

pub fn channel(id: &str, name: &str, subscribers: u64, price: Option<f64>) -> CatalogItem {
    CatalogItem {
        subscribers: Some(subscribers),
        price,
        ..CatalogItem::new(ItemId::new(id).unwrap(), name)
    }
}

/// 48 channels with mixed audiences, repeated prices and a few unpriced rows.
pub fn dataset_48() -> Vec<CatalogItem> {
    (0..48u64)
        .map(|n| {
            let subscribers = 2_500 + (n * 7_919) % 40_000;
            let price = (n % 7 != 3).then(|| 1_000.0 * ((n * 5) % 9) as f64);
            let mut item = channel(&format!("ch-{n:02}"), &format!("Channel {n:02}"), subscribers, price);
            item.category = Some(if n % 2 == 0 { "Tech" } else { "News" }.to_string());
            item
        })
        .collect()
}
