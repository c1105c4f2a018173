use auth::Credential;
use auth::IssuedToken;

use crate::domain::user::models::PublicUser;

/// Login attempt as received from the client.
///
/// `email` is kept raw; an unparseable key is just an unknown identity.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: Credential,
}

/// Successful login: a fresh token plus the user it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: PublicUser,
}
