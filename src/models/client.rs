use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientContact {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub memo: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub contacts: Vec<ClientContact>,
    pub total_revenue: i64,
    pub unpaid_amount: i64,
    pub address: String,
    pub business_number: String,
    pub memo: String,
}

impl Client {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            ..Default::default()
        }
    }

    pub fn primary_contact(&self) -> Option<&ClientContact> {
        self.contacts.iter().find(|c| c.is_primary)
    }

    /// Mark the contact with `contact_id` as primary and clear the flag on
    /// every other contact. Returns false (and changes nothing) when the id
    /// does not belong to this client.
    pub fn set_primary_contact(&mut self, contact_id: i64) -> bool {
        if !self.contacts.iter().any(|c| c.id == contact_id) {
            return false;
        }

        for c in &mut self.contacts {
            c.is_primary = c.id == contact_id;
        }
        true
    }

    /// Append a contact; a primary newcomer demotes the current primary.
    pub fn add_contact(&mut self, contact: ClientContact) {
        if contact.is_primary {
            for c in &mut self.contacts {
                c.is_primary = false;
            }
        }
        self.contacts.push(contact);
    }
}
