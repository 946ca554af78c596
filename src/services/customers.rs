use std::collections::HashMap;
use std::path::Path;

use crate::entities::Customer;
use crate::error::{AppError, AppResult};

/// Lookup of known customers by phone number
pub trait CustomerDirectory: Send + Sync {
    /// Exact match on the phone string; no normalisation is applied
    fn find(&self, phone: &str) -> Option<Customer>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    customers: HashMap<String, Customer>,
}

impl InMemoryDirectory {
    pub fn new(customers: HashMap<String, Customer>) -> Self {
        Self { customers }
    }

    /// Directory with the built-in demo customers
    pub fn seeded() -> Self {
        let entries = [
            ("+17744153244", "John", "Smith", "john.smith@example.com"),
            ("+12125551234", "Sarah", "Johnson", "sarah.j@example.com"),
            ("+14155559876", "Michael", "Chen", "mchen@example.com"),
        ];

        let customers = entries
            .into_iter()
            .map(|(phone, first, last, email)| {
                (
                    phone.to_string(),
                    Customer {
                        first_name: first.to_string(),
                        last_name: last.to_string(),
                        email: email.to_string(),
                    },
                )
            })
            .collect();

        Self { customers }
    }

    /// Load a JSON object of `phone -> { firstName, lastName, email }`
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read customer directory {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let customers: HashMap<String, Customer> = serde_json::from_str(raw)
            .map_err(|e| AppError::Internal(format!("Invalid customer directory: {}", e)))?;
        Ok(Self { customers })
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerDirectory for InMemoryDirectory {
    fn find(&self, phone: &str) -> Option<Customer> {
        self.customers.get(phone).cloned()
    }
}
