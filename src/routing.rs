//! Device-Adaptive Routing
//!
//! Phones get the `/mobile` tree, larger screens the admin tree. The UI
//! evaluates [`redirect_for`] whenever the path or viewport changes; the
//! API exposes the same decision for other clients.

use serde::{Deserialize, Serialize};

/// Viewports narrower than this are treated as phones
pub const MOBILE_BREAKPOINT: u32 = 768;

const ADMIN_ROUTES: &[&str] = &[
    "/dashboard",
    "/doctors",
    "/appointments",
    "/patients",
    "/profile",
];

const MOBILE_UA_MARKERS: &[&str] = &[
    "android",
    "iphone",
    "ipod",
    "ipad",
    "mobile",
    "blackberry",
    "opera mini",
    "iemobile",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: u32) -> Self {
        if width < MOBILE_BREAKPOINT {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if MOBILE_UA_MARKERS.iter().any(|marker| ua.contains(marker)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Width wins when known; the user agent is the fallback
    pub fn detect(width: Option<u32>, user_agent: Option<&str>) -> Self {
        match (width, user_agent) {
            (Some(width), _) => Self::from_width(width),
            (None, Some(ua)) => Self::from_user_agent(ua),
            (None, None) => DeviceClass::Desktop,
        }
    }

    pub fn is_mobile(&self) -> bool {
        *self == DeviceClass::Mobile
    }
}

fn is_admin_route(path: &str) -> bool {
    ADMIN_ROUTES.iter().any(|route| {
        path == *route
            || path
                .strip_prefix(route)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Where a visitor on `path` should be sent, if anywhere
pub fn redirect_for(path: &str, device: DeviceClass) -> Option<&'static str> {
    if path == "/" {
        return Some(match device {
            DeviceClass::Mobile => "/mobile",
            DeviceClass::Desktop => "/dashboard",
        });
    }

    match device {
        DeviceClass::Mobile if !path.starts_with("/mobile") && is_admin_route(path) => {
            Some("/mobile")
        }
        DeviceClass::Desktop if path.starts_with("/mobile") => Some("/dashboard"),
        _ => None,
    }
}
