//! Groups a cycle's price records by canonical instrument.

use std::collections::BTreeMap;

use arbscan_core::{InstrumentGroup, PriceRecord};

/// Group records by `instrument`.
///
/// Every record lands in exactly one group. Records keep their input order
/// within a group, and repeated quotes from one source are all retained.
pub fn group<I>(records: I) -> BTreeMap<String, InstrumentGroup>
where
    I: IntoIterator<Item = PriceRecord>,
{
    let mut groups: BTreeMap<String, InstrumentGroup> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.instrument.clone())
            .or_insert_with(|| InstrumentGroup::new(&record.instrument))
            .records
            .push(record);

    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbscan_core::Exchange;

    fn rec(instrument: &str, source: Exchange, price: f64) -> PriceRecord {
        PriceRecord { instrument: instrument.into(), price, source, observed_at_ms: 0 }
    }

    #[test]
    fn groups_by_instrument() {
        let groups = group(vec![
            rec("BTC-USDT", Exchange::Binance, 50000.0),
            rec("ETH-USDT", Exchange::Binance, 3000.0),
            rec("BTC-USDT", Exchange::Hyperliquid, 50100.0),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["BTC-USDT"].len(), 2);
        assert_eq!(groups["BTC-USDT"].records[0].source, Exchange::Binance);
        assert_eq!(groups["ETH-USDT"].len(), 1);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["BTC-USDT", "ETH-USDT"]);
    }

    #[test]
    fn keeps_same_source_duplicates() {
        let groups = group(vec![
            rec("BTC-USDT", Exchange::Backpack, 1.0),
            rec("BTC-USDT", Exchange::Backpack, 2.0),
        ]);

        assert_eq!(groups["BTC-USDT"].len(), 2);
        assert_eq!(groups["BTC-USDT"].source_count(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(group(Vec::new()).is_empty());
    }
}
