//! Behaviour of the account service with real hashing and in-memory storage.

use std::sync::Arc;

use cascii::domain::ports::AccountService;
use cascii::domain::{
    EMAIL_MAX_LENGTH, LoginCredentials, RegistrationOutcome, RegistrationRejection,
    SessionAccountService, UserId,
};
use cascii::outbound::security::{Sha512PasswordHasher, UuidSessionKeyGenerator};
use cascii::test_support::{InMemorySessionRepository, InMemoryUserRepository};
use rstest::{fixture, rstest};

type Accounts = SessionAccountService<
    InMemoryUserRepository,
    InMemorySessionRepository,
    Sha512PasswordHasher,
    UuidSessionKeyGenerator,
>;

struct World {
    users: Arc<InMemoryUserRepository>,
    sessions: Arc<InMemorySessionRepository>,
    accounts: Accounts,
}

#[fixture]
fn world() -> World {
    let users = Arc::new(InMemoryUserRepository::default());
    let sessions = Arc::new(InMemorySessionRepository::default());
    let accounts = SessionAccountService::new(
        Arc::clone(&users),
        Arc::clone(&sessions),
        Arc::new(Sha512PasswordHasher),
        Arc::new(UuidSessionKeyGenerator),
    )
    .expect("decoy hash");
    World {
        users,
        sessions,
        accounts,
    }
}

fn creds(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("non-empty credentials")
}

async fn register(world: &World, email: &str, password: &str) -> UserId {
    match world
        .accounts
        .register(email, password)
        .await
        .expect("register")
    {
        RegistrationOutcome::Registered(id) => id,
        RegistrationOutcome::Rejected(reason) => panic!("unexpected rejection: {reason}"),
    }
}

#[rstest]
#[tokio::test]
async fn duplicate_registration_is_refused(world: World) {
    register(&world, "a@test.com", "12345").await;

    let again = world
        .accounts
        .register("a@test.com", "12345")
        .await
        .expect("register");

    assert_eq!(
        again,
        RegistrationOutcome::Rejected(RegistrationRejection::AlreadyExists)
    );
    assert_eq!(world.users.len(), 1);
}

#[rstest]
#[case("a@test.com", "123", RegistrationRejection::PasswordTooShort)]
#[case("testtest.com", "12345", RegistrationRejection::InvalidEmail)]
#[case("Ada <a@test.com>", "12345", RegistrationRejection::InvalidEmail)]
#[tokio::test]
async fn invalid_registrations_create_no_rows(
    world: World,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: RegistrationRejection,
) {
    let outcome = world
        .accounts
        .register(email, password)
        .await
        .expect("register");

    assert_eq!(outcome, RegistrationOutcome::Rejected(expected));
    assert!(world.users.is_empty());
}

#[rstest]
#[tokio::test]
async fn overlong_email_is_a_rejection_not_a_failure(world: World) {
    let email = format!("{}@test.com", "a".repeat(EMAIL_MAX_LENGTH));

    let outcome = world
        .accounts
        .register(&email, "12345")
        .await
        .expect("register");

    assert_eq!(
        outcome,
        RegistrationOutcome::Rejected(RegistrationRejection::InvalidEmail)
    );
    assert!(world.users.is_empty());
}

#[rstest]
#[tokio::test]
async fn login_opens_a_session_that_resolves_to_the_user(world: World) {
    let id = register(&world, "a@test.com", "12345").await;

    let key = world
        .accounts
        .login(&creds("a@test.com", "12345"))
        .await
        .expect("login")
        .expect("session key");

    assert_eq!(
        world.accounts.resolve_session(&key).await.expect("resolve"),
        Some(id)
    );
    let user = world
        .accounts
        .current_user(id)
        .await
        .expect("lookup")
        .expect("user");
    assert_eq!(user.email().as_ref(), "a@test.com");
}

#[rstest]
#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable(world: World) {
    register(&world, "a@test.com", "12345").await;

    let unknown = world
        .accounts
        .login(&creds("nobody@test.com", "12345"))
        .await
        .expect("login");
    let wrong = world
        .accounts
        .login(&creds("a@test.com", "54321"))
        .await
        .expect("login");

    assert!(unknown.is_none());
    assert!(wrong.is_none());
}

#[rstest]
#[tokio::test]
async fn logout_revokes_every_session_of_the_user(world: World) {
    let alice = register(&world, "a@test.com", "12345").await;
    let bob = register(&world, "b@test.com", "12345").await;
    let first = world
        .accounts
        .login(&creds("a@test.com", "12345"))
        .await
        .expect("login")
        .expect("key");
    let second = world
        .accounts
        .login(&creds("a@test.com", "12345"))
        .await
        .expect("login")
        .expect("key");
    let bobs = world
        .accounts
        .login(&creds("b@test.com", "12345"))
        .await
        .expect("login")
        .expect("key");
    assert_ne!(first, second);
    assert_eq!(world.sessions.count_for(alice), 2);

    world.accounts.logout(alice).await.expect("logout");

    assert!(world.accounts.resolve_session(&first).await.expect("resolve").is_none());
    assert!(world.accounts.resolve_session(&second).await.expect("resolve").is_none());
    assert_eq!(
        world.accounts.resolve_session(&bobs).await.expect("resolve"),
        Some(bob)
    );
}
