//! Login gating: account status, showroom status, and device approval.
//!
//! Password verification happens first (in the API layer). Once the
//! credentials are known to be good, [`check_account`] decides whether the
//! profile may sign in at all, and [`evaluate`] decides whether the device it
//! is signing in from has been approved for its showroom.

use std::fmt;

use crate::roles::ROLE_ADMIN;

/// Why a login with valid credentials was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDenial {
    AccountDisabled,
    ShowroomInactive,
    DeviceAwaitingApproval,
    DeviceBlocked,
}

impl LoginDenial {
    /// Stable machine-readable code returned to clients.
    pub fn code(self) -> &'static str {
        match self {
            LoginDenial::AccountDisabled => "ACCOUNT_DISABLED",
            LoginDenial::ShowroomInactive => "SHOWROOM_INACTIVE",
            LoginDenial::DeviceAwaitingApproval => "DEVICE_AWAITING_APPROVAL",
            LoginDenial::DeviceBlocked => "DEVICE_BLOCKED",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LoginDenial::AccountDisabled => {
                "Account is disabled. Please contact your administrator."
            }
            LoginDenial::ShowroomInactive => {
                "Your showroom is currently inactive. Please contact the administrator."
            }
            LoginDenial::DeviceAwaitingApproval => "This device is awaiting administrator approval.",
            LoginDenial::DeviceBlocked => "This device has been blocked.",
        }
    }
}

impl fmt::Display for LoginDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Approval flags of a `device_auth` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    pub active: bool,
    pub awaiting_approval: bool,
}

impl DeviceState {
    /// State of a device seen for the first time.
    pub const PENDING: DeviceState = DeviceState {
        active: false,
        awaiting_approval: true,
    };
}

/// Outcome of the device check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Admins are never subject to device approval.
    Bypass,
    Allowed,
    Denied(LoginDenial),
}

/// Check profile and showroom status before any device lookup.
///
/// `showroom_active` is `None` when the profile has no showroom (admins).
pub fn check_account(
    role: &str,
    profile_active: bool,
    showroom_active: Option<bool>,
) -> Result<(), LoginDenial> {
    if !profile_active {
        return Err(LoginDenial::AccountDisabled);
    }
    if role != ROLE_ADMIN && showroom_active == Some(false) {
        return Err(LoginDenial::ShowroomInactive);
    }
    Ok(())
}

/// Decide whether a device may be used to sign in.
///
/// `awaiting_approval` takes precedence over `active`, so a pending device is
/// reported as pending rather than blocked.
pub fn evaluate(role: &str, device: DeviceState) -> GateDecision {
    if role == ROLE_ADMIN {
        return GateDecision::Bypass;
    }
    if device.awaiting_approval {
        return GateDecision::Denied(LoginDenial::DeviceAwaitingApproval);
    }
    if !device.active {
        return GateDecision::Denied(LoginDenial::DeviceBlocked);
    }
    GateDecision::Allowed
}

/// Whether the role must pass the device check at all.
pub fn requires_device_check(role: &str) -> bool {
    role != ROLE_ADMIN
}
