//! Weight of Evidence and Information Value for categorical predictors.
//!
//! For each category `c` of a predictor:
//!
//! - `pct_goods(c) = goods(c) / Σ goods`, `pct_bads(c) = bads(c) / Σ bads`
//! - `WOE(c) = ln(pct_goods / pct_bads)`
//! - `IV(c) = (pct_goods - pct_bads) * WOE(c)`
//!
//! and the predictor's Information Value is `Σ IV(c)`. A category with no
//! goods or no bads would give an infinite WOE, so a zero count is replaced
//! by 1 before the percentages are taken.

use std::collections::BTreeMap;
use std::fmt;

use infoval_core::{ensure_same_length, Result};

/// Per-category WOE statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WoeRow<T> {
    /// Category value.
    pub category: T,
    /// Rows with the good outcome (before smoothing).
    pub goods: usize,
    /// Rows with any other outcome (before smoothing).
    pub bads: usize,
    /// `goods + bads`.
    pub total: usize,
    /// Share of all goods falling in this category (smoothed).
    pub pct_goods: f64,
    /// Share of all bads falling in this category (smoothed).
    pub pct_bads: f64,
    /// `ln(pct_goods / pct_bads)`.
    pub woe: f64,
    /// `(pct_goods - pct_bads) * woe`.
    pub iv: f64,
}

/// WOE table over all observed categories, in category order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WoeTable<T> {
    /// One row per category, sorted by category.
    pub rows: Vec<WoeRow<T>>,
}

impl<T: Ord> WoeTable<T> {
    /// WOE of `category`, or `None` if it was never observed.
    pub fn woe_of(&self, category: &T) -> Option<f64> {
        self.rows
            .binary_search_by(|r| r.category.cmp(category))
            .ok()
            .map(|i| self.rows[i].woe)
    }

    /// Sum of per-category IV, banded by strength.
    pub fn information_value(&self) -> InformationValue {
        let value = self.rows.iter().map(|r| r.iv).sum();
        InformationValue {
            value,
            predictiveness: Predictiveness::from_iv(value),
        }
    }
}

impl<T: fmt::Display> fmt::Display for WoeTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9} {:>8}",
            "category", "goods", "bads", "total", "pct_g", "pct_b", "woe", "iv"
        )?;
        for r in &self.rows {
            writeln!(
                f,
                "{:<16} {:>8} {:>8} {:>8} {:>8.4} {:>8.4} {:>9.4} {:>8.4}",
                r.category.to_string(),
                r.goods,
                r.bads,
                r.total,
                r.pct_goods,
                r.pct_bads,
                r.woe,
                r.iv
            )?;
        }
        Ok(())
    }
}

/// Strength band of an Information Value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predictiveness {
    /// IV below 0.03.
    NotPredictive,
    /// IV in `[0.03, 0.1)`.
    SomewhatPredictive,
    /// IV in `[0.1, 0.3)`.
    ModeratelyPredictive,
    /// IV of 0.3 or more.
    HighlyPredictive,
}

impl Predictiveness {
    /// Band of `iv`. NaN falls in the top band.
    pub fn from_iv(iv: f64) -> Self {
        if iv < 0.03 {
            Predictiveness::NotPredictive
        } else if iv < 0.1 {
            Predictiveness::SomewhatPredictive
        } else if iv < 0.3 {
            Predictiveness::ModeratelyPredictive
        } else {
            Predictiveness::HighlyPredictive
        }
    }
}

impl fmt::Display for Predictiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Predictiveness::NotPredictive => "Not Predictive",
            Predictiveness::SomewhatPredictive => "Somewhat Predictive",
            Predictiveness::ModeratelyPredictive => "Moderately Predictive",
            Predictiveness::HighlyPredictive => "Highly Predictive",
        };
        f.write_str(s)
    }
}

/// Information Value of a predictor with its strength band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InformationValue {
    /// Sum of per-category IV.
    pub value: f64,
    /// Band of `value`.
    pub predictiveness: Predictiveness,
}

/// Build the WOE table of `categories` against `outcomes`.
///
/// An outcome equal to `value_of_good` is a good; any other present outcome
/// is a bad. Rows with a missing category or outcome are skipped.
///
/// # Errors
///
/// Returns an error if the slices differ in length.
pub fn woe_table<T: Ord + Clone>(
    categories: &[Option<T>],
    outcomes: &[Option<u8>],
    value_of_good: u8,
) -> Result<WoeTable<T>> {
    ensure_same_length(categories.len(), outcomes.len())?;

    let mut counts: BTreeMap<&T, (usize, usize)> = BTreeMap::new();
    for (cat, out) in categories.iter().zip(outcomes) {
        let (Some(cat), Some(out)) = (cat, out) else {
            continue;
        };
        let entry = counts.entry(cat).or_default();
        if *out == value_of_good {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let smooth = |n: usize| n.max(1) as f64;
    let total_goods: f64 = counts.values().map(|&(g, _)| smooth(g)).sum();
    let total_bads: f64 = counts.values().map(|&(_, b)| smooth(b)).sum();

    let rows = counts
        .into_iter()
        .map(|(cat, (goods, bads))| {
            let pct_goods = smooth(goods) / total_goods;
            let pct_bads = smooth(bads) / total_bads;
            let woe = (pct_goods / pct_bads).ln();
            WoeRow {
                category: cat.clone(),
                goods,
                bads,
                total: goods + bads,
                pct_goods,
                pct_bads,
                woe,
                iv: (pct_goods - pct_bads) * woe,
            }
        })
        .collect::<Vec<_>>();

    log::debug!("woe: {} categories", rows.len());

    Ok(WoeTable { rows })
}

/// Replace every category with its WOE.
///
/// Rows with a missing category map to `None`. Categories only seen with a
/// missing outcome are absent from the table and also map to `None`.
///
/// # Errors
///
/// Returns an error if the slices differ in length.
pub fn woe<T: Ord + Clone>(
    categories: &[Option<T>],
    outcomes: &[Option<u8>],
    value_of_good: u8,
) -> Result<Vec<Option<f64>>> {
    let table = woe_table(categories, outcomes, value_of_good)?;
    Ok(categories
        .iter()
        .map(|c| c.as_ref().and_then(|c| table.woe_of(c)))
        .collect())
}

/// Information Value of `categories` as a predictor of `outcomes`.
///
/// # Errors
///
/// Returns an error if the slices differ in length.
pub fn information_value<T: Ord + Clone>(
    categories: &[Option<T>],
    outcomes: &[Option<u8>],
    value_of_good: u8,
) -> Result<InformationValue> {
    Ok(woe_table(categories, outcomes, value_of_good)?.information_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(s: &str) -> Vec<Option<char>> {
        s.chars().map(|c| if c == '?' { None } else { Some(c) }).collect()
    }

    fn outs(v: &[u8]) -> Vec<Option<u8>> {
        v.iter().copied().map(Some).collect()
    }

    #[test]
    fn two_category_table() {
        // A: 3 goods, 1 bad; B: 1 good, 3 bads
        let c = cats("AAAABBBB");
        let o = outs(&[1, 1, 1, 0, 1, 0, 0, 0]);
        let table = woe_table(&c, &o, 1).unwrap();
        assert_eq!(table.rows.len(), 2);

        let a = &table.rows[0];
        assert_eq!(a.category, 'A');
        assert_eq!((a.goods, a.bads, a.total), (3, 1, 4));
        assert!((a.pct_goods - 0.75).abs() < 1e-12);
        assert!((a.pct_bads - 0.25).abs() < 1e-12);
        assert!((a.woe - 3f64.ln()).abs() < 1e-12);
        assert!((a.iv - 0.5 * 3f64.ln()).abs() < 1e-12);

        let b = &table.rows[1];
        assert!((b.woe + 3f64.ln()).abs() < 1e-12);

        let iv = table.information_value();
        assert!((iv.value - 3f64.ln()).abs() < 1e-12);
        assert_eq!(iv.predictiveness, Predictiveness::HighlyPredictive);
    }

    #[test]
    fn value_of_good_flips_sign() {
        let c = cats("AAAABBBB");
        let o = outs(&[1, 1, 1, 0, 1, 0, 0, 0]);
        let good_one = woe_table(&c, &o, 1).unwrap();
        let good_zero = woe_table(&c, &o, 0).unwrap();
        assert!((good_one.rows[0].woe + good_zero.rows[0].woe).abs() < 1e-12);
    }

    #[test]
    fn zero_count_is_smoothed() {
        // A has no bads; smoothing keeps the WOE finite.
        let c = cats("AABB");
        let o = outs(&[1, 1, 1, 0]);
        let table = woe_table(&c, &o, 1).unwrap();
        assert!(table.rows.iter().all(|r| r.woe.is_finite()));
        assert_eq!(table.rows[0].bads, 0);
    }

    #[test]
    fn missing_rows_skipped() {
        let c = cats("A?AB");
        let o = vec![Some(1), Some(0), None, Some(0)];
        let table = woe_table(&c, &o, 1).unwrap();
        assert_eq!(table.rows[0].total, 1);
        assert_eq!(table.rows[1].total, 1);
    }

    #[test]
    fn per_row_woe() {
        let c = cats("AB?A");
        let o = outs(&[1, 0, 1, 0]);
        let table = woe_table(&c, &o, 1).unwrap();
        let w = woe(&c, &o, 1).unwrap();
        assert_eq!(w.len(), 4);
        assert_eq!(w[0], table.woe_of(&'A'));
        assert_eq!(w[1], table.woe_of(&'B'));
        assert_eq!(w[2], None);
        assert_eq!(w[3], w[0]);
    }

    #[test]
    fn uninformative_predictor() {
        let c = cats("AABB");
        let o = outs(&[1, 0, 1, 0]);
        let iv = information_value(&c, &o, 1).unwrap();
        assert!(iv.value.abs() < 1e-12);
        assert_eq!(iv.predictiveness, Predictiveness::NotPredictive);
    }

    #[test]
    fn string_categories() {
        let c = vec![Some("red".to_string()), Some("blue".to_string()), None];
        let o = outs(&[1, 0, 1]);
        let table = woe_table(&c, &o, 1).unwrap();
        assert_eq!(table.rows[0].category, "blue");
        assert!(table.woe_of(&"green".to_string()).is_none());
    }

    #[test]
    fn length_mismatch() {
        assert!(woe_table(&cats("AB"), &outs(&[1]), 1).is_err());
    }

    #[test]
    fn predictiveness_bands() {
        assert_eq!(Predictiveness::from_iv(0.01), Predictiveness::NotPredictive);
        assert_eq!(Predictiveness::from_iv(0.05), Predictiveness::SomewhatPredictive);
        assert_eq!(Predictiveness::from_iv(0.2), Predictiveness::ModeratelyPredictive);
        assert_eq!(Predictiveness::from_iv(0.3), Predictiveness::HighlyPredictive);
        assert_eq!(Predictiveness::HighlyPredictive.to_string(), "Highly Predictive");
    }

    #[test]
    fn display_has_row_per_category() {
        let table = woe_table(&cats("AABB"), &outs(&[1, 0, 1, 1]), 1).unwrap();
        assert_eq!(table.to_string().lines().count(), 3);
    }
}
