use compscope_core::error::{CompscopeError, Result};
use compscope_core::models::{Coordinates, SubjectProperty};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// A rejected field and why
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(ValidationError { field: field.into(), reason: reason.into() });
    }
}

/// Check a coordinate pair against the WGS 84 ranges
pub fn validate_coordinates(coords: &Coordinates) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !coords.lat.is_finite() || !(-90.0..=90.0).contains(&coords.lat) {
        result.add_error("lat", format!("Latitude {} must be within [-90, 90]", coords.lat));
    }
    if !coords.lng.is_finite() || !(-180.0..=180.0).contains(&coords.lng) {
        result.add_error("lng", format!("Longitude {} must be within [-180, 180]", coords.lng));
    }

    result
}

/// Validate every field of a subject property
pub fn validate_subject(subject: &SubjectProperty) -> ValidationResult {
    let mut result = validate_coordinates(&subject.location);

    if subject.sqft == 0 {
        result.add_error("sqft", "Square footage must be positive");
    }

    if !subject.baths.is_finite() || subject.baths < 0.0 {
        result.add_error("baths", "Bathroom count must be a non-negative number");
    } else if (subject.baths * 2.0).fract() != 0.0 {
        result.add_error("baths", format!("Bathroom count {} is not a half step", subject.baths));
    }

    if !(1600..=2100).contains(&subject.year_built) {
        result.add_error(
            "year_built",
            format!("Year built {} is outside 1600-2100", subject.year_built),
        );
    }

    result
}

/// Validate a subject and convert the first failure into an error
pub fn ensure_valid_subject(subject: &SubjectProperty) -> Result<()> {
    let validation = validate_subject(subject);
    let Some(first) = validation.errors.first() else {
        return Ok(());
    };

    if first.field == "lat" || first.field == "lng" {
        return Err(CompscopeError::InvalidCoordinates {
            lat: subject.location.lat,
            lng: subject.location.lng,
            reason: first.reason.clone(),
        });
    }

    Err(CompscopeError::InvalidSubject {
        field: first.field.clone(),
        reason: first.reason.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subject_is_valid() {
        let result = validate_subject(&SubjectProperty::default());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(ensure_valid_subject(&SubjectProperty::default()).is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let subject = SubjectProperty::default().with_location(Coordinates::new(95.0, -200.0));
        let result = validate_subject(&subject);
        assert_eq!(result.errors.len(), 2);

        assert!(matches!(
            ensure_valid_subject(&subject),
            Err(CompscopeError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_field_errors() {
        let subject = SubjectProperty { sqft: 0, baths: 2.25, ..SubjectProperty::default() };
        let result = validate_subject(&subject);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "sqft"));
        assert!(result.errors.iter().any(|e| e.field == "baths"));

        match ensure_valid_subject(&subject) {
            Err(CompscopeError::InvalidSubject { field, .. }) => assert_eq!(field, "sqft"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
