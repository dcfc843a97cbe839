//! Movie record data model
//!
//! The attribute set the user fills in on the input screen. Every field is
//! kept as entered; numeric interpretation happens in the estimator.

/// Rating choices offered by the input screen picker
pub const RATING_OPTIONS: &[&str] = &["G", "PG", "PG-13", "R", "NC-17"];

/// One field of a [`MovieRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Name,
    Genre,
    Director,
    Star,
    Writer,
    Rating,
    Released,
    Runtime,
    Score,
    Budget,
    Year,
    Votes,
    Country,
    Company,
}

impl RecordField {
    /// All fields in form order
    pub const ALL: [RecordField; 14] = [
        Self::Name,
        Self::Genre,
        Self::Director,
        Self::Star,
        Self::Writer,
        Self::Rating,
        Self::Released,
        Self::Runtime,
        Self::Score,
        Self::Budget,
        Self::Year,
        Self::Votes,
        Self::Country,
        Self::Company,
    ];

    /// Fields that must be non-empty before a prediction can be requested
    pub const REQUIRED: [RecordField; 8] = [
        Self::Name,
        Self::Genre,
        Self::Director,
        Self::Runtime,
        Self::Score,
        Self::Budget,
        Self::Year,
        Self::Votes,
    ];

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Movie Title",
            Self::Genre => "Genre",
            Self::Director => "Director",
            Self::Star => "Lead Star",
            Self::Writer => "Writer",
            Self::Rating => "MPAA Rating",
            Self::Released => "Release Date",
            Self::Runtime => "Runtime (minutes)",
            Self::Score => "Expected Score",
            Self::Budget => "Budget ($)",
            Self::Year => "Release Year",
            Self::Votes => "Survey Votes",
            Self::Country => "Country",
            Self::Company => "Production Studio",
        }
    }

    /// Example value shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Enter your movie title",
            Self::Genre => "e.g., Action, Comedy, Drama",
            Self::Director => "Director name",
            Self::Star => "Lead actor name",
            Self::Writer => "Screenwriter name",
            Self::Rating => "Select rating",
            Self::Released => "e.g., June 14, 2024",
            Self::Runtime => "120",
            Self::Score => "7.5",
            Self::Budget => "50000000",
            Self::Year => "2024",
            Self::Votes => "50000",
            Self::Country => "USA",
            Self::Company => "Studio name",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// Whether the field holds a number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Runtime | Self::Score | Self::Budget | Self::Year | Self::Votes
        )
    }
}

/// User-entered movie attributes. All fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRecord {
    pub name: String,
    pub genre: String,
    pub director: String,
    pub star: String,
    pub country: String,
    pub company: String,
    pub rating: String,
    pub runtime: String,
    pub score: String,
    pub budget: String,
    pub year: String,
    pub votes: String,
    pub released: String,
    pub writer: String,
}

impl MovieRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field by key
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Genre => &self.genre,
            RecordField::Director => &self.director,
            RecordField::Star => &self.star,
            RecordField::Writer => &self.writer,
            RecordField::Rating => &self.rating,
            RecordField::Released => &self.released,
            RecordField::Runtime => &self.runtime,
            RecordField::Score => &self.score,
            RecordField::Budget => &self.budget,
            RecordField::Year => &self.year,
            RecordField::Votes => &self.votes,
            RecordField::Country => &self.country,
            RecordField::Company => &self.company,
        }
    }

    /// Replace a field's value
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let slot = match field {
            RecordField::Name => &mut self.name,
            RecordField::Genre => &mut self.genre,
            RecordField::Director => &mut self.director,
            RecordField::Star => &mut self.star,
            RecordField::Writer => &mut self.writer,
            RecordField::Rating => &mut self.rating,
            RecordField::Released => &mut self.released,
            RecordField::Runtime => &mut self.runtime,
            RecordField::Score => &mut self.score,
            RecordField::Budget => &mut self.budget,
            RecordField::Year => &mut self.year,
            RecordField::Votes => &mut self.votes,
            RecordField::Country => &mut self.country,
            RecordField::Company => &mut self.company,
        };
        *slot = value.into();
    }

    /// Builder-style setter
    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Required fields that are still empty, in form order
    pub fn missing_required(&self) -> Vec<RecordField> {
        RecordField::REQUIRED
            .iter()
            .copied()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// True when every required field is non-empty
    pub fn is_complete(&self) -> bool {
        RecordField::REQUIRED
            .iter()
            .all(|field| !self.get(*field).is_empty())
    }

    /// True when no field holds a value
    pub fn is_empty(&self) -> bool {
        RecordField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Reset every field to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> MovieRecord {
        MovieRecord::new()
            .with(RecordField::Name, "Test")
            .with(RecordField::Genre, "Drama")
            .with(RecordField::Director, "X")
            .with(RecordField::Runtime, "100")
            .with(RecordField::Score, "9")
            .with(RecordField::Budget, "10000000")
            .with(RecordField::Year, "2020")
            .with(RecordField::Votes, "1000")
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = MovieRecord::default();
        assert!(record.is_empty());
        assert!(!record.is_complete());
        assert_eq!(record.missing_required(), RecordField::REQUIRED.to_vec());
    }

    #[test]
    fn test_get_set_every_field() {
        let mut record = MovieRecord::new();
        for (i, field) in RecordField::ALL.iter().enumerate() {
            record.set(*field, format!("value-{}", i));
        }
        for (i, field) in RecordField::ALL.iter().enumerate() {
            assert_eq!(record.get(*field), format!("value-{}", i));
        }
    }

    #[test]
    fn test_optional_fields_do_not_gate_completion() {
        let record = complete_record();
        assert!(record.is_complete());
        assert!(record.star.is_empty());
        assert!(record.rating.is_empty());
        assert!(record.writer.is_empty());
    }

    #[test]
    fn test_each_missing_required_field_is_reported() {
        for field in RecordField::REQUIRED {
            let record = complete_record().with(field, "");
            assert!(!record.is_complete());
            assert_eq!(record.missing_required(), vec![field]);
        }
    }

    #[test]
    fn test_clear() {
        let mut record = complete_record().with(RecordField::Country, "USA");
        record.clear();
        assert_eq!(record, MovieRecord::default());
    }

    #[test]
    fn test_field_flags() {
        assert!(RecordField::Budget.is_numeric());
        assert!(RecordField::Budget.is_required());
        assert!(!RecordField::Genre.is_numeric());
        assert!(!RecordField::Rating.is_required());
        assert_eq!(RecordField::ALL.len(), 14);
    }
}
