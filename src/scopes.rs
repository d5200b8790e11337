//! Venue scope tokens and the authorization predicates built on them.
//!
//! Predicates are pure functions of the caller and the target's owner; they
//! never touch the store. Ownership alone is not enough to mutate anything:
//! the matching `venues:*` scope must also be present.

use uuid::Uuid;

use crate::identity::CurrentUser;

/// Scope tokens recognized by this service, as issued by the users service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Read,
    Write,
    Delete,
    Images,
    Schedule,
    Admin,
    AdminRead,
    AdminWrite,
    AdminDelete,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Read => "venues:read",
            Scope::Write => "venues:write",
            Scope::Delete => "venues:delete",
            Scope::Images => "venues:images",
            Scope::Schedule => "venues:schedule",
            Scope::Admin => "admin:venues",
            Scope::AdminRead => "admin:venues:read",
            Scope::AdminWrite => "admin:venues:write",
            Scope::AdminDelete => "admin:venues:delete",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff the caller holds the top-level venue admin scope.
pub fn is_admin(user: &CurrentUser) -> bool {
    user.has_scope(Scope::Admin)
}

/// Read endpoints are public; the gateway does not gate them and neither do
/// we. Kept explicit so the route policy is auditable in one place.
pub fn can_read(_user: Option<&CurrentUser>) -> bool {
    true
}

/// Owner write: id match plus the write scope.
pub fn can_write(user: &CurrentUser, owner_id: Uuid) -> bool {
    user.id == owner_id && user.has_scope(Scope::Write)
}

pub fn can_write_or_admin(user: &CurrentUser, owner_id: Uuid) -> bool {
    can_write(user, owner_id) || user.has_scope(Scope::AdminWrite) || is_admin(user)
}

pub fn can_delete_or_admin(user: &CurrentUser, owner_id: Uuid) -> bool {
    (user.id == owner_id && user.has_scope(Scope::Delete))
        || user.has_scope(Scope::AdminDelete)
        || is_admin(user)
}

pub fn can_manage_images(user: &CurrentUser, owner_id: Uuid) -> bool {
    (user.id == owner_id && user.has_scope(Scope::Images))
        || user.has_scope(Scope::AdminWrite)
        || is_admin(user)
}

pub fn can_manage_schedule(user: &CurrentUser, owner_id: Uuid) -> bool {
    (user.id == owner_id && user.has_scope(Scope::Schedule))
        || user.has_scope(Scope::AdminWrite)
        || is_admin(user)
}

/// Ownership-independent admin check.
pub fn can_admin(user: &CurrentUser) -> bool {
    is_admin(user)
}

/// Gate for administrative mutations such as status transitions.
pub fn can_admin_write(user: &CurrentUser) -> bool {
    user.has_scope(Scope::AdminWrite) || is_admin(user)
}

/// Creation has no owner yet; any caller with a write-capable scope may
/// create, and the new venue is owned by the caller.
pub fn can_create(user: &CurrentUser) -> bool {
    user.has_scope(Scope::Write) || user.has_scope(Scope::AdminWrite) || is_admin(user)
}
