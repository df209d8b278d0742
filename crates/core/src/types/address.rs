//! Shipping address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A required shipping address field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    FullName,
    Address,
    City,
    State,
    ZipCode,
    Country,
}

impl AddressField {
    /// All required fields, in form order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
        Self::Country,
    ];

    /// Form label for the field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "Zip code",
            Self::Country => "Country",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur when validating a [`ShippingAddress`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// One or more required fields are blank.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<AddressField>),
}

fn join_fields(fields: &[AddressField]) -> String {
    fields
        .iter()
        .map(AddressField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A shipping address as entered at checkout.
///
/// ## Constraints
///
/// Every field must be non-empty after trimming whitespace. Use
/// [`ShippingAddress::validate`] before placing an order.
///
/// ## Examples
///
/// ```
/// use medmart_core::ShippingAddress;
///
/// let address = ShippingAddress {
///     full_name: "Asha Rao".to_string(),
///     address: "12 MG Road".to_string(),
///     city: "Bengaluru".to_string(),
///     state: "Karnataka".to_string(),
///     zip_code: "560001".to_string(),
///     country: "India".to_string(),
/// };
/// assert!(address.validate().is_ok());
/// assert!(ShippingAddress::default().validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Value of a field by name.
    #[must_use]
    pub fn field(&self, field: AddressField) -> &str {
        match field {
            AddressField::FullName => &self.full_name,
            AddressField::Address => &self.address,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::ZipCode => &self.zip_code,
            AddressField::Country => &self.country,
        }
    }

    /// Fields that are blank after trimming.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<AddressField> {
        AddressField::ALL
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::MissingFields`] listing every blank field.
    pub fn validate(&self) -> Result<(), AddressError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AddressError::MissingFields(missing))
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            zip_code: self.zip_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
        }
    }
}
