// src/routes.rs
//! Page routes and the role each one needs

use std::fmt;

use crate::types::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Jobs,
    JobDetail(i64),
    MyApplications(i64),
    AdminDashboard,
    AdminJobs,
    AdminJobCreate,
    AdminJobDetail(i64),
    AdminJobEdit(i64),
    AdminApplications,
    AdminApplicationDetail(i64),
    AdminInterviews,
    AdminSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Route {
    /// Match a path. Unknown admin paths land on the dashboard, anything
    /// else unknown lands on the home page.
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let id = |raw: &str| raw.parse::<i64>().ok();

        let matched = match segments.as_slice() {
            [] => Some(Route::Home),
            ["jobs"] => Some(Route::Jobs),
            ["job", raw] => id(raw).map(Route::JobDetail),
            ["my-applications", raw] => id(raw).map(Route::MyApplications),
            ["admin"] => Some(Route::AdminDashboard),
            ["admin", "jobs"] => Some(Route::AdminJobs),
            ["admin", "jobs", "create"] => Some(Route::AdminJobCreate),
            ["admin", "jobs", raw] => id(raw).map(Route::AdminJobDetail),
            ["admin", "jobs", raw, "edit"] => id(raw).map(Route::AdminJobEdit),
            ["admin", "applications"] => Some(Route::AdminApplications),
            ["admin", "applications", raw] => id(raw).map(Route::AdminApplicationDetail),
            ["admin", "interviews"] => Some(Route::AdminInterviews),
            ["admin", "settings"] => Some(Route::AdminSettings),
            _ => None,
        };

        matched.unwrap_or(match segments.first() {
            Some(&"admin") => Route::AdminDashboard,
            _ => Route::Home,
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::JobDetail(id) => format!("/job/{}", id),
            Route::MyApplications(id) => format!("/my-applications/{}", id),
            Route::AdminDashboard => "/admin".to_string(),
            Route::AdminJobs => "/admin/jobs".to_string(),
            Route::AdminJobCreate => "/admin/jobs/create".to_string(),
            Route::AdminJobDetail(id) => format!("/admin/jobs/{}", id),
            Route::AdminJobEdit(id) => format!("/admin/jobs/{}/edit", id),
            Route::AdminApplications => "/admin/applications".to_string(),
            Route::AdminApplicationDetail(id) => format!("/admin/applications/{}", id),
            Route::AdminInterviews => "/admin/interviews".to_string(),
            Route::AdminSettings => "/admin/settings".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::Jobs | Route::JobDetail(_) => Access::Public,
            Route::MyApplications(_) => Access::Authenticated,
            _ => Access::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolve `path` for a visitor with `role` (`None` when logged out)
pub fn navigate(path: &str, role: Option<Role>) -> Navigation {
    let route = Route::resolve(path);
    let allowed = match route.access() {
        Access::Public => true,
        Access::Authenticated => role.is_some(),
        Access::Admin => role.is_some_and(|r| r.is_admin()),
    };

    if allowed {
        Navigation::Render(route)
    } else {
        Navigation::Redirect(Route::Home)
    }
}
