//! Canonical code and display label for every pricing enum.
//!
//! Each enum has exactly one table. Codes are what goes over the wire; labels
//! are what users see. Parsing accepts either, and anything unrecognized maps
//! to the enum's `Default`.

use serde::{Deserialize, Serialize};

/// Bidirectional mapping between an enum and its code/label table.
pub trait Labeled: Copy + PartialEq + Default + 'static {
    /// `(variant, code, display label)`, one row per variant.
    const TABLE: &'static [(Self, &'static str, &'static str)];

    fn code(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _, _)| *v == self)
            .map(|(_, code, _)| *code)
            .unwrap_or_default()
    }

    fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _, _)| *v == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }

    fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::TABLE
            .iter()
            .find(|(_, c, _)| c.eq_ignore_ascii_case(code))
            .map(|(v, _, _)| *v)
    }

    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::TABLE
            .iter()
            .find(|(_, _, l)| *l == label)
            .map(|(v, _, _)| *v)
    }

    /// Resolve a code or a label, falling back to `Default`.
    fn parse(value: &str) -> Self {
        Self::from_code(value)
            .or_else(|| Self::from_label(value))
            .unwrap_or_default()
    }

    fn entries() -> Vec<LabelEntry> {
        Self::TABLE
            .iter()
            .map(|(_, code, label)| LabelEntry {
                code: *code,
                label: *label,
            })
            .collect()
    }
}

/// One row of a label table, as exposed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct LabelEntry {
    pub code: &'static str,
    pub label: &'static str,
}

/// Hotel room occupancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    #[default]
    Double,
    Triple,
    Quad,
    Quint,
    Suite,
}

impl Labeled for RoomType {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (RoomType::Single, "single", "مفردة"),
        (RoomType::Double, "double", "ثنائي"),
        (RoomType::Triple, "triple", "ثلاثي"),
        (RoomType::Quad, "quad", "رباعي"),
        (RoomType::Quint, "quint", "خماسي"),
        (RoomType::Suite, "suite", "جناح"),
    ];
}

/// Package lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    #[default]
    Draft,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl Labeled for PackageStatus {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (PackageStatus::Draft, "draft", "مسودة"),
        (PackageStatus::Confirmed, "confirmed", "مؤكد"),
        (PackageStatus::InProgress, "in_progress", "قيد التنفيذ"),
        (PackageStatus::Completed, "completed", "مكتمل"),
        (PackageStatus::Cancelled, "cancelled", "ملغي"),
    ];
}

/// Booking payment position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    NotPaid,
    PartiallyPaid,
    FullyPaid,
    Refunded,
}

impl Labeled for PaymentStatus {
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (PaymentStatus::NotPaid, "not_paid", "لم يدفع"),
        (PaymentStatus::PartiallyPaid, "partially_paid", "دفع جزئي"),
        (PaymentStatus::FullyPaid, "fully_paid", "مدفوع بالكامل"),
        (PaymentStatus::Refunded, "refunded", "مسترد"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_round_trips<T: Labeled + std::fmt::Debug>(variants: &[T]) {
        assert_eq!(T::TABLE.len(), variants.len(), "table must cover every variant");
        for v in variants {
            assert_eq!(T::from_code(v.code()), Some(*v));
            assert_eq!(T::from_label(v.label()), Some(*v));
        }
    }

    #[test]
    fn test_tables_cover_all_variants() {
        use PackageStatus as P;
        use PaymentStatus as S;
        use RoomType as R;

        assert_table_round_trips(&[R::Single, R::Double, R::Triple, R::Quad, R::Quint, R::Suite]);
        assert_table_round_trips(&[P::Draft, P::Confirmed, P::InProgress, P::Completed, P::Cancelled]);
        assert_table_round_trips(&[S::NotPaid, S::PartiallyPaid, S::FullyPaid, S::Refunded]);
    }

    #[test]
    fn test_parse_accepts_code_or_label() {
        assert_eq!(RoomType::parse("quad"), RoomType::Quad);
        assert_eq!(RoomType::parse(" QUAD "), RoomType::Quad);
        assert_eq!(RoomType::parse("رباعي"), RoomType::Quad);
        assert_eq!(PackageStatus::parse("in_progress"), PackageStatus::InProgress);
        assert_eq!(PackageStatus::parse("قيد التنفيذ"), PackageStatus::InProgress);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_default() {
        assert_eq!(RoomType::parse("penthouse"), RoomType::Double);
        assert_eq!(RoomType::parse(""), RoomType::Double);
        assert_eq!(PackageStatus::parse("archived"), PackageStatus::Draft);
        assert_eq!(PaymentStatus::parse("?"), PaymentStatus::NotPaid);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&PackageStatus::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);
        let parsed: RoomType = serde_json::from_str(r#""quint""#).unwrap();
        assert_eq!(parsed, RoomType::Quint);
    }

    #[test]
    fn test_entries_in_table_order() {
        let entries = PaymentStatus::entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].code, "not_paid");
        assert_eq!(entries[3].label, "مسترد");
    }
}
