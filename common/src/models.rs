use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A customer record. Optional fields use the empty string for "absent".
///
/// Every field defaults when missing or `null` in a JSON body so that
/// incomplete payloads reach [`Customer::validate`] instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: Uuid,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub middle_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub phone_number: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("First name, last name, and email are required")]
pub struct CustomerValidationError;

impl Customer {
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.email.is_empty() || self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(CustomerValidationError);
        }
        Ok(())
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}
