// Feed message text.
//
// Each builder takes the outcome of the profile lookup and falls back to a
// generic sentence when the profile is missing or has no usable name.

use crate::domain::user::UserProfile;
use crate::error::JoinMiss;

fn name_of(profile: &Result<UserProfile, JoinMiss>) -> Option<&str> {
    profile.as_ref().ok().and_then(UserProfile::display_name)
}

pub fn walker_selected_message(walker: &Result<UserProfile, JoinMiss>) -> String {
    match name_of(walker) {
        Some(name) => format!("{} has been selected for your walk request", name),
        None => "A walker has been selected for your walk request".to_string(),
    }
}

pub fn new_application_message(walker: &Result<UserProfile, JoinMiss>) -> String {
    match name_of(walker) {
        Some(name) => format!("{} applied for your walk request", name),
        None => "A walker applied for your walk request".to_string(),
    }
}

pub fn application_accepted_message(owner: &Result<UserProfile, JoinMiss>) -> String {
    match name_of(owner) {
        Some(name) => format!("{} accepted your application", name),
        None => "Your application has been accepted".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserType;

    fn profile(name: &str, user_type: UserType) -> Result<UserProfile, JoinMiss> {
        Ok(UserProfile::new(name.to_string(), "someone@example.com".to_string(), user_type))
    }

    #[test]
    fn test_messages_use_names_when_present() {
        assert_eq!(
            walker_selected_message(&profile("Walt", UserType::Walker)),
            "Walt has been selected for your walk request"
        );
        assert_eq!(
            new_application_message(&profile("Walt", UserType::Walker)),
            "Walt applied for your walk request"
        );
        assert_eq!(
            application_accepted_message(&profile("Olga", UserType::DogOwner)),
            "Olga accepted your application"
        );
    }

    #[test]
    fn test_messages_fall_back_on_miss() {
        let miss: Result<UserProfile, JoinMiss> = Err(JoinMiss::NotFound);
        assert_eq!(walker_selected_message(&miss), "A walker has been selected for your walk request");
        assert_eq!(new_application_message(&miss), "A walker applied for your walk request");
        assert_eq!(application_accepted_message(&miss), "Your application has been accepted");

        let failed: Result<UserProfile, JoinMiss> = Err(JoinMiss::Failed("pool".into()));
        assert_eq!(application_accepted_message(&failed), "Your application has been accepted");
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(
            new_application_message(&profile("  ", UserType::Walker)),
            "A walker applied for your walk request"
        );
    }
}
