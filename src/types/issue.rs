/// An issue closed by the pull request, as reported by the code host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedIssue {
    pub number: u64,
    pub repository_id: Option<String>,
}
