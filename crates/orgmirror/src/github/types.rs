//! GitHub API wire types.

use serde::Deserialize;

use crate::host::{RemoteOrg, RemoteRepo};

/// An organization as returned by `/orgs/{login}` or `/organizations/{id}`.
///
/// Only the fields sync cares about; everything else in the payload is
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubOrg {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<GithubOrg> for RemoteOrg {
    fn from(org: GithubOrg) -> Self {
        RemoteOrg {
            id: org.id,
            login: org.login,
            name: org.name,
            site: org.blog.filter(|s| !s.is_empty()),
            email: org.email,
            location: org.location,
            bio: org.description,
        }
    }
}

/// A repository entry from `/orgs/{login}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub full_name: String,
}

impl From<GithubRepo> for RemoteRepo {
    fn from(repo: GithubRepo) -> Self {
        RemoteRepo {
            full_name: repo.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_org_deserialize_and_convert() {
        let json = serde_json::json!({
            "id": 4223,
            "login": "rails",
            "name": "Ruby on Rails",
            "blog": "https://rubyonrails.org",
            "email": null,
            "location": "Chicago",
            "description": "Web development that doesn't hurt",
            "public_repos": 70,
        });
        let org: GithubOrg = serde_json::from_value(json).unwrap();
        let remote: RemoteOrg = org.into();
        assert_eq!(remote.id, 4223);
        assert_eq!(remote.login, "rails");
        assert_eq!(remote.site.as_deref(), Some("https://rubyonrails.org"));
        assert_eq!(remote.bio.as_deref(), Some("Web development that doesn't hurt"));
        assert_eq!(remote.email, None);
    }

    #[test]
    fn test_github_org_empty_blog_becomes_none() {
        let json = serde_json::json!({ "id": 1, "login": "x", "blog": "" });
        let org: GithubOrg = serde_json::from_value(json).unwrap();
        let remote: RemoteOrg = org.into();
        assert_eq!(remote.site, None);
    }

    #[test]
    fn test_github_repo_convert() {
        let json = serde_json::json!({ "full_name": "rails/rails", "fork": false });
        let repo: GithubRepo = serde_json::from_value(json).unwrap();
        let remote: RemoteRepo = repo.into();
        assert_eq!(remote.full_name, "rails/rails");
    }
}
