//! Demo walking a session through login, gated rendering, and logout.
//!
//! Prints which dashboard entries each kind of visitor would see.

use session_gate_core::session::audit::{init_global_logger, AuditLogger};
use session_gate_core::session::{
    authority, visible_items, AuthSession, AuthorizationGate, CurrentUser, GrantedAuthority,
    LoginArtifacts, MemorySessionStore, PageItem, SessionStore,
};

fn dashboard_pages() -> Vec<PageItem> {
    vec![
        PageItem::new("statistics", "/statistics")
            .required_roles(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]),
        PageItem::new("projects", "/projects")
            .secondary_url("/projects/new")
            .required_roles(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]),
        PageItem::new("articles", "/articles")
            .secondary_url("/articles/new")
            .required_roles(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]),
        PageItem::new("users", "/users").required_roles(&[authority::ROLE_ADMIN]),
        PageItem::new("about", "/about"),
    ]
}

fn render_nav<S: SessionStore>(who: &str, gate: &AuthorizationGate<S>, pages: &[PageItem]) {
    let labels: Vec<&str> = visible_items(gate, pages)
        .iter()
        .map(|item| item.get_label())
        .collect();
    println!("{:<12} sees: {}", who, labels.join(", "));
}

fn main() {
    init_global_logger(AuditLogger::with_stdout());

    let store = MemorySessionStore::new();
    let gate = AuthorizationGate::new(&store).with_audit(AuditLogger::with_stdout());
    let pages = dashboard_pages();

    render_nav("anonymous", &gate, &pages);

    let basic = LoginArtifacts {
        user: CurrentUser::new("1", "Ada", "Lovelace", "ada@example.com"),
        access_token: "access-basic".to_string(),
        refresh_token: "refresh-basic".to_string(),
        authorities: vec![GrantedAuthority::new(authority::ROLE_BASIC)],
    };
    AuthSession::login(&store, &basic).expect("login should fit in an unbounded store");
    render_nav("basic user", &gate, &pages);

    let admin = LoginArtifacts {
        user: CurrentUser::new("2", "Grace", "Hopper", "grace@example.com"),
        access_token: "access-admin".to_string(),
        refresh_token: "refresh-admin".to_string(),
        authorities: vec![
            GrantedAuthority::new(authority::ROLE_BASIC),
            GrantedAuthority::new(authority::ROLE_ADMIN),
        ],
    };
    AuthSession::login(&store, &admin).expect("login should fit in an unbounded store");
    render_nav("admin", &gate, &pages);

    AuthSession::logout(&store);
    render_nav("logged out", &gate, &pages);
}
