use manifest::api;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
    pub owner: User,
}

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
}

#[derive(Deserialize, Debug)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
pub struct Comment {
    pub id: u64,
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}

impl From<Repo> for api::Repository {
    fn from(repo: Repo) -> Self {
        api::Repository::new(repo.owner.login, repo.name)
    }
}

impl From<Issue> for api::Issue {
    fn from(issue: Issue) -> Self {
        api::Issue::new(issue.number, issue.title, issue.user.map(|user| user.login))
    }
}

impl From<Comment> for api::Comment {
    fn from(comment: Comment) -> Self {
        api::Comment::new(comment.id, comment.user.map(|user| user.login))
    }
}
