use crate::postal_code::PostalCode;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub postal_code  : PostalCode,
    pub street       : Option<String>,
    pub neighborhood : Option<String>,
    pub city         : Option<String>,
    pub state        : Option<String>,
}

impl PostalAddress {
    pub fn new(postal_code: PostalCode) -> Self {
        Self {
            postal_code,
            street: None,
            neighborhood: None,
            city: None,
            state: None,
        }
    }

    pub fn has_street(&self) -> bool {
        non_blank(&self.street).is_some()
    }

    pub fn street(&self) -> Option<&str> {
        non_blank(&self.street)
    }

    pub fn neighborhood(&self) -> Option<&str> {
        non_blank(&self.neighborhood)
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        non_blank(&self.state)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
