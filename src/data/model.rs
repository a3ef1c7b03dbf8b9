use std::fmt;

// ---------------------------------------------------------------------------
// Row – one record of the vehicle dataset
// ---------------------------------------------------------------------------

/// A single dataset record, kept exactly as it was read.
///
/// Every column is stored as raw text: the source may carry `year` and
/// `kms_driven` either as numbers or as quoted strings, and a short line may
/// omit trailing fields altogether. Interpretation is deferred to the
/// accessor below and to the option index builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Model identifier, e.g. `"Maruti Suzuki Swift"`.
    pub name: String,
    pub company: String,
    pub year: String,
    pub kms_driven: String,
    pub fuel_type: String,
}

impl Row {
    /// Manufacturing year, if the cell holds something integer-like.
    pub fn year(&self) -> Option<i32> {
        parse_leading_int(&self.year).and_then(|v| i32::try_from(v).ok())
    }
}

/// Lenient integer parse: optional sign followed by at least one digit,
/// anything after the digit run is ignored (`"2015.0"` → 2015).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

// ---------------------------------------------------------------------------
// Field – the five user-selectable attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Company,
    Model,
    Year,
    FuelType,
    KmsDriven,
}

/// Boundary mapping between a [`Field`] and the form parameter the
/// prediction endpoint expects. Order here is the order on the wire.
pub const FORM_FIELDS: [(Field, &str); 5] = [
    (Field::Company, "company"),
    (Field::Model, "car_models"),
    (Field::Year, "year"),
    (Field::FuelType, "fuel_type"),
    (Field::KmsDriven, "kilo_driven"),
];

impl Field {
    /// Dataset column backing this field.
    pub fn column(self) -> &'static str {
        match self {
            Field::Company => "company",
            Field::Model => "name",
            Field::Year => "year",
            Field::FuelType => "fuel_type",
            Field::KmsDriven => "kms_driven",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Company => "Company",
            Field::Model => "Model",
            Field::Year => "Year",
            Field::FuelType => "Fuel Type",
            Field::KmsDriven => "Kms Driven",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_accepts_padded_and_fractional_text() {
        assert_eq!(parse_leading_int("2015"), Some(2015));
        assert_eq!(parse_leading_int(" 2015 "), Some(2015));
        assert_eq!(parse_leading_int("2015.0"), Some(2015));
        assert_eq!(parse_leading_int("-12"), Some(-12));
        assert_eq!(parse_leading_int("45000 km"), Some(45000));
    }

    #[test]
    fn leading_int_rejects_non_numeric_text() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("   "), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("Petrol 2015"), None);
    }

    #[test]
    fn year_accessor_parses_lenient_text() {
        let row = |year: &str| Row {
            year: year.into(),
            ..Row::default()
        };
        assert_eq!(row("2018").year(), Some(2018));
        assert_eq!(row("2018.0").year(), Some(2018));
        assert_eq!(row("99999999999").year(), None);
        assert_eq!(row("").year(), None);
    }

    #[test]
    fn form_fields_cover_every_field_once() {
        let fields: Vec<Field> = FORM_FIELDS.iter().map(|(field, _)| *field).collect();
        for field in [
            Field::Company,
            Field::Model,
            Field::Year,
            Field::FuelType,
            Field::KmsDriven,
        ] {
            assert_eq!(fields.iter().filter(|f| **f == field).count(), 1);
        }
        let names: Vec<&str> = FORM_FIELDS.iter().map(|(_, name)| *name).collect();
        assert_eq!(names, ["company", "car_models", "year", "fuel_type", "kilo_driven"]);
    }
}
