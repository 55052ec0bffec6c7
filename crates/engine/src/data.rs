//! Training-input loading
//!
//! The data-preparation collaborator exports cleaned, deduplicated rating
//! rows as CSV with a `user_id,item_id,rating` header. This loader only
//! parses; scale validation happens when the rating store is built.

use crate::ratings::RatingRow;
use std::path::Path;
use tasterank_core::{Result, TasteRankError};

/// Read all rating rows from a CSV file.
///
/// # Errors
///
/// Returns `DataLoad` if the file cannot be opened or a row fails to parse.
pub fn load_ratings_csv(path: &Path) -> Result<Vec<RatingRow>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        TasteRankError::data_load(format!("cannot open {}: {e}", path.display()))
    })?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: RatingRow = record
            .map_err(|e| TasteRankError::data_load(format!("malformed rating row: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_loads_well_formed_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(
            &path,
            "user_id,item_id,rating\nA3SGXH7AUHU8GW,B001E4KFG0,5.0\nA1MZYO9TZK0BBI,B001E4KFG0,1.0\n",
        )
        .unwrap();

        let rows = load_ratings_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "A3SGXH7AUHU8GW");
        assert_eq!(rows[0].item_id, "B001E4KFG0");
        assert_eq!(rows[0].rating, 5.0);
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = load_ratings_csv(Path::new("/nonexistent/reviews.csv")).unwrap_err();
        assert!(matches!(err, TasteRankError::DataLoad(_)));
    }

    #[test]
    fn test_non_numeric_rating_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, "user_id,item_id,rating\nu1,i1,five\n").unwrap();

        let err = load_ratings_csv(&path).unwrap_err();
        assert!(matches!(err, TasteRankError::DataLoad(_)));
    }
}
