//! Navigation targets.

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    Login,
    Register,
    #[default]
    Gallery,
}

/// Moves the presentation layer to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_default() {
        assert_eq!(Route::Login.to_string(), "login");
        assert_eq!(Route::Register.to_string(), "register");
        assert_eq!(Route::default(), Route::Gallery);
    }
}
