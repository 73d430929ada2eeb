//! Seller contact

use crate::products::Seller;

const TEAMS_CHAT_URL: &str = "https://teams.microsoft.com/l/chat/0/0?users=";

/// Teams deep link that opens a chat with `handle`.
pub fn teams_chat_url(handle: &str) -> String {
    format!("{TEAMS_CHAT_URL}{}", urlencoding::encode(handle.trim()))
}

/// Teams deep link for a seller.
pub fn contact_seller(seller: &Seller) -> String {
    teams_chat_url(&seller.teams_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_handle() {
        assert_eq!(
            teams_chat_url("john.smith@nab.com.au"),
            "https://teams.microsoft.com/l/chat/0/0?users=john.smith%40nab.com.au"
        );
        assert_eq!(
            teams_chat_url(" a b+c "),
            "https://teams.microsoft.com/l/chat/0/0?users=a%20b%2Bc"
        );
    }
}
