use crate::db::models::UserRole;

/// Roles an actor may create or manage accounts for.
pub fn manageable_roles(actor: UserRole) -> &'static [UserRole] {
    match actor {
        UserRole::Admin => &[
            UserRole::Admin,
            UserRole::Coordinator,
            UserRole::Supervisor,
            UserRole::Trainee,
        ],
        UserRole::Coordinator => &[UserRole::Supervisor, UserRole::Trainee],
        UserRole::Supervisor | UserRole::Trainee => &[],
    }
}

pub fn can_manage(actor: UserRole, target: UserRole) -> bool {
    manageable_roles(actor).contains(&target)
}

/// Whether a role may act on submission and placement reviews.
pub fn can_review(role: UserRole) -> bool {
    matches!(
        role,
        UserRole::Admin | UserRole::Coordinator | UserRole::Supervisor
    )
}
