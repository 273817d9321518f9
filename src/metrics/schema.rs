//! Canonical columns of the monthly metrics table and the mapping from the
//! caller's header text onto them.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// The seven required columns, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Month,
    EngagedAccounts,
    Followers,
    Reach,
    Interactions,
    Likes,
    Comments,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Month,
        Column::EngagedAccounts,
        Column::Followers,
        Column::Reach,
        Column::Interactions,
        Column::Likes,
        Column::Comments,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Column::Month => "Month",
            Column::EngagedAccounts => "EngagedAccounts",
            Column::Followers => "Followers",
            Column::Reach => "Reach",
            Column::Interactions => "Interactions",
            Column::Likes => "Likes",
            Column::Comments => "Comments",
        }
    }
}

/// The six numeric measures of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    EngagedAccounts,
    Followers,
    Reach,
    Interactions,
    Likes,
    Comments,
}

impl Measure {
    pub const ALL: [Measure; 6] = [
        Measure::EngagedAccounts,
        Measure::Followers,
        Measure::Reach,
        Measure::Interactions,
        Measure::Likes,
        Measure::Comments,
    ];

    pub fn column(&self) -> Column {
        match self {
            Measure::EngagedAccounts => Column::EngagedAccounts,
            Measure::Followers => Column::Followers,
            Measure::Reach => Column::Reach,
            Measure::Interactions => Column::Interactions,
            Measure::Likes => Column::Likes,
            Measure::Comments => Column::Comments,
        }
    }
}

/// Header text used for each canonical column in the caller's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub month: String,
    pub engaged_accounts: String,
    pub followers: String,
    pub reach: String,
    pub interactions: String,
    pub likes: String,
    pub comments: String,
}

impl ColumnMapping {
    /// Headers used by the Portuguese dashboards.
    pub fn portuguese() -> Self {
        Self {
            month: "Mês".to_string(),
            engaged_accounts: "Contas com Engajamento".to_string(),
            followers: "Seguidores".to_string(),
            reach: "Alcance".to_string(),
            interactions: "Interações".to_string(),
            likes: "Curtidas".to_string(),
            comments: "Comentários".to_string(),
        }
    }

    pub fn header_for(&self, column: Column) -> &str {
        match column {
            Column::Month => &self.month,
            Column::EngagedAccounts => &self.engaged_accounts,
            Column::Followers => &self.followers,
            Column::Reach => &self.reach,
            Column::Interactions => &self.interactions,
            Column::Likes => &self.likes,
            Column::Comments => &self.comments,
        }
    }

    /// Header row in canonical column order.
    pub fn headers(&self) -> Vec<&str> {
        Column::ALL.iter().map(|c| self.header_for(*c)).collect()
    }

    /// Reject mappings where two columns share a header. Compared the way
    /// [`locate`](Self::locate) matches: trimmed and case-insensitive.
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<String> = Vec::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            let header = self.header_for(column).trim().to_lowercase();
            if seen.contains(&header) {
                return Err(CoreError::DuplicateHeader(self.header_for(column).trim().to_string()));
            }
            seen.push(header);
        }
        Ok(())
    }

    /// Position of each canonical column within `header`, or the canonical
    /// names of the columns that could not be found.
    ///
    /// Matching ignores surrounding whitespace and letter case.
    pub fn locate<S: AsRef<str>>(&self, header: &[S]) -> std::result::Result<[usize; 7], Vec<String>> {
        let mut positions = [0usize; 7];
        let mut missing = Vec::new();

        for (slot, column) in Column::ALL.iter().enumerate() {
            let wanted = self.header_for(*column).trim().to_lowercase();
            match header
                .iter()
                .position(|h| h.as_ref().trim().trim_start_matches('\u{feff}').to_lowercase() == wanted)
            {
                Some(idx) => positions[slot] = idx,
                None => missing.push(column.canonical_name().to_string()),
            }
        }

        if missing.is_empty() {
            Ok(positions)
        } else {
            Err(missing)
        }
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            month: Column::Month.canonical_name().to_string(),
            engaged_accounts: Column::EngagedAccounts.canonical_name().to_string(),
            followers: Column::Followers.canonical_name().to_string(),
            reach: Column::Reach.canonical_name().to_string(),
            interactions: Column::Interactions.canonical_name().to_string(),
            likes: Column::Likes.canonical_name().to_string(),
            comments: Column::Comments.canonical_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_reordered_header() {
        let header = ["Comments", "month", " Reach ", "Likes", "Followers", "Interactions", "EngagedAccounts"];
        let positions = ColumnMapping::default().locate(&header[..]).unwrap();
        assert_eq!(positions, [1, 6, 4, 2, 5, 3, 0]);
    }

    #[test]
    fn test_locate_reports_missing_in_canonical_order() {
        let header = ["Month", "Followers", "Reach", "Interactions"];
        let missing = ColumnMapping::default().locate(&header[..]).unwrap_err();
        assert_eq!(missing, vec!["EngagedAccounts", "Likes", "Comments"]);
    }

    #[test]
    fn test_validate_rejects_shared_header() {
        assert_eq!(ColumnMapping::default().validate(), Ok(()));
        assert_eq!(ColumnMapping::portuguese().validate(), Ok(()));

        let mapping = ColumnMapping {
            likes: " reach".to_string(),
            ..ColumnMapping::default()
        };
        assert_eq!(mapping.validate(), Err(CoreError::DuplicateHeader("reach".to_string())));
    }

    #[test]
    fn test_portuguese_mapping() {
        let mapping = ColumnMapping::portuguese();
        let header = mapping.headers();
        assert_eq!(header[0], "Mês");
        assert!(mapping.locate(&header[..]).is_ok());
    }
}
