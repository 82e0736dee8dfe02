const CAMPAIGNS_PREFIX: &str = "/campaigns/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Inbox,
    Contacts,
    Campaigns,
    CampaignNew,
    CampaignDetail(String),
    Templates,
}

impl Route {
    /// Exact match against the route table. `None` for anything unknown.
    pub fn parse(path: &str) -> Option<Route> {
        let route = match path {
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/dashboard" => Route::Dashboard,
            "/inbox" => Route::Inbox,
            "/contacts" => Route::Contacts,
            "/campaigns" => Route::Campaigns,
            "/campaigns/new" => Route::CampaignNew,
            "/templates" => Route::Templates,
            _ => {
                let id = path.strip_prefix(CAMPAIGNS_PREFIX)?.split('/').next()?;
                if id.is_empty() {
                    return None;
                }
                // the browser hands the path over percent-encoded
                let id = urlencoding::decode(id).map(|id| id.into_owned()).unwrap_or_else(|_| id.to_string());
                Route::CampaignDetail(id)
            }
        };
        Some(route)
    }

    /// Applies the login gate and the unknown-path fallback.
    pub fn resolve(path: &str, has_token: bool) -> Route {
        match Route::parse(path) {
            Some(route) if route.is_public() || has_token => route,
            Some(_) => Route::Login,
            None if has_token => Route::Dashboard,
            None => Route::Login,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Inbox => "/inbox".to_string(),
            Route::Contacts => "/contacts".to_string(),
            Route::Campaigns => "/campaigns".to_string(),
            Route::CampaignNew => "/campaigns/new".to_string(),
            Route::CampaignDetail(id) => format!("{CAMPAIGNS_PREFIX}{}", urlencoding::encode(id)),
            Route::Templates => "/templates".to_string(),
        }
    }

    pub fn fragment(&self) -> &'static str {
        match self {
            Route::Login => "/pages/login.html",
            Route::Signup => "/pages/signup.html",
            Route::Dashboard => "/pages/dashboard.html",
            Route::Inbox => "/pages/inbox.html",
            Route::Contacts => "/pages/contacts.html",
            Route::Campaigns => "/pages/campaigns.html",
            Route::CampaignNew => "/pages/campaign-new.html",
            Route::CampaignDetail(_) => "/pages/campaign-detail.html",
            Route::Templates => "/pages/templates.html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE: [&str; 7] = [
        "/dashboard",
        "/inbox",
        "/contacts",
        "/campaigns",
        "/campaigns/new",
        "/campaigns/42",
        "/templates",
    ];

    #[test]
    fn private_paths_redirect_without_token() {
        for path in PRIVATE {
            assert_eq!(Route::resolve(path, false), Route::Login, "{path}");
        }
    }

    #[test]
    fn private_paths_pass_with_token() {
        for path in PRIVATE {
            assert_eq!(Route::resolve(path, true).path(), path);
        }
    }

    #[test]
    fn public_paths_never_gated() {
        assert_eq!(Route::resolve("/login", false), Route::Login);
        assert_eq!(Route::resolve("/signup", false), Route::Signup);
        assert_eq!(Route::resolve("/signup", true), Route::Signup);
    }

    #[test]
    fn campaign_detail_extracts_id() {
        assert_eq!(Route::parse("/campaigns/abc-1"), Some(Route::CampaignDetail("abc-1".into())));
        assert_eq!(Route::parse("/campaigns/7/"), Some(Route::CampaignDetail("7".into())));
        assert_eq!(Route::parse("/campaigns/new"), Some(Route::CampaignNew));
        assert_eq!(Route::parse("/campaigns/"), None);
        assert_eq!(Route::CampaignDetail("9".into()).fragment(), "/pages/campaign-detail.html");
    }

    #[test]
    fn campaign_id_decoded_once() {
        let route = Route::parse("/campaigns/a%20b").unwrap();
        assert_eq!(route, Route::CampaignDetail("a b".into()));
        assert_eq!(route.path(), "/campaigns/a%20b");
        assert_eq!(Route::resolve("/campaigns/a%20b", true).path(), "/campaigns/a%20b");
        assert_eq!(Route::parse("/campaigns/%E0%A4"), Some(Route::CampaignDetail("%E0%A4".into())));
    }

    #[test]
    fn unknown_paths_fall_back() {
        assert_eq!(Route::resolve("/nowhere", false), Route::Login);
        assert_eq!(Route::resolve("/", true), Route::Dashboard);
    }
}
