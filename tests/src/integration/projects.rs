//! Project lifecycle through the client SDK.

use crate::TestCluster;
use sc_01_projects::prelude::{Mint, Project, ProjectState, TokenAccount};
use sc_01_projects::token::PROJECT_TOKEN_DECIMALS;
use sc_03_client::{ClientError, Keypair, Program};
use serde_json::json;
use shared_types::TxSignature;

/// Keys of a created project.
struct Created {
    project: Keypair,
    mint: Keypair,
    vault: Keypair,
    signature: TxSignature,
}

async fn create_project(program: &Program, name: &str, allocation: u64) -> Created {
    let project = Keypair::generate();
    let mint = Keypair::generate();
    let vault = Keypair::generate();
    let creator = program.provider().wallet().pubkey();

    let signature = program
        .method("create_project")
        .unwrap()
        .args(vec![json!(name), json!("integration"), json!(allocation)])
        .accounts([
            ("project", project.pubkey()),
            ("creator", creator),
            ("token_mint", mint.pubkey()),
            ("project_vault", vault.pubkey()),
        ])
        .signers(&[project.clone(), mint.clone(), vault.clone()])
        .rpc()
        .await
        .unwrap();

    Created {
        project,
        mint,
        vault,
        signature,
    }
}

async fn update_state(
    program: &Program,
    created: &Created,
    creator: &Keypair,
    state: &str,
) -> Result<TxSignature, ClientError> {
    program
        .method("update_project_state")
        .unwrap()
        .arg(state)
        .account("project", created.project.pubkey())
        .account("creator", creator.pubkey())
        .signer(creator)
        .rpc()
        .await
}

#[tokio::test]
async fn test_create_project_mints_allocation() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let creator = program.provider().wallet().pubkey();

    let created = create_project(&program, "Alpha", 1_000_000).await;

    let project: Project = program
        .fetch_account("Project", &created.project.pubkey())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.id, created.project.pubkey());
    assert_eq!(project.name, "Alpha");
    assert_eq!(project.state, ProjectState::Active);
    assert_eq!(project.token_mint, created.mint.pubkey());
    assert_eq!(project.creator, creator);
    assert_eq!(project.total_allocation, 1_000_000);

    let mint: Mint = program
        .fetch_account("Mint", &created.mint.pubkey())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mint.decimals, PROJECT_TOKEN_DECIMALS);
    assert_eq!(mint.mint_authority, Some(creator));
    assert_eq!(mint.supply, 1_000_000);

    let vault: TokenAccount = program
        .fetch_account("TokenAccount", &created.vault.pubkey())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vault.mint, created.mint.pubkey());
    assert_eq!(vault.owner, created.project.pubkey());
    assert_eq!(vault.amount, 1_000_000);

    let details = program
        .provider()
        .rpc()
        .get_transaction(&created.signature)
        .await
        .unwrap()
        .unwrap();
    assert!(details.logs.iter().any(|l| l.starts_with("Program data: ")));
    assert_eq!(details.events.len(), 1);
    assert_eq!(details.events[0]["name"], "ProjectCreated");
    assert_eq!(details.events[0]["data"]["name"], "Alpha");
    assert_eq!(
        details.events[0]["data"]["project_id"],
        created.project.pubkey().to_string()
    );

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_project_twice_fails() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let created = create_project(&program, "Alpha", 10).await;

    // Reusing the project account is rejected.
    let err = program
        .method("create_project")
        .unwrap()
        .args(vec![json!("Again"), json!(""), json!(1)])
        .accounts([
            ("project", created.project.pubkey()),
            ("creator", program.provider().wallet().pubkey()),
            ("token_mint", Keypair::generate().pubkey()),
            ("project_vault", Keypair::generate().pubkey()),
        ])
        .rpc()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingSigner(_)));

    let mint = Keypair::generate();
    let vault = Keypair::generate();
    let err = program
        .method("create_project")
        .unwrap()
        .args(vec![json!("Again"), json!(""), json!(1)])
        .accounts([
            ("project", created.project.pubkey()),
            ("creator", program.provider().wallet().pubkey()),
            ("token_mint", mint.pubkey()),
            ("project_vault", vault.pubkey()),
        ])
        .signers(&[created.project.clone(), mint, vault])
        .rpc()
        .await
        .unwrap_err();
    assert_eq!(err.custom_program_error(), Some(0));

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_to_same_state_fails_with_6000() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let creator = program.provider().wallet().clone();
    let created = create_project(&program, "Beta", 5).await;

    let before = cluster.bank().read().account(&created.project.pubkey());

    let err = update_state(&program, &created, &creator, "Active")
        .await
        .unwrap_err();
    assert_eq!(err.custom_program_error(), Some(6000));
    let logs = err.logs().unwrap();
    assert!(logs
        .iter()
        .any(|l| l.contains("Error Code: InvalidStateTransition. Error Number: 6000.")));

    let after = cluster.bank().read().account(&created.project.pubkey());
    assert_eq!(before, after);

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_to_new_state_succeeds() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let creator = program.provider().wallet().clone();
    let created = create_project(&program, "Gamma", 5).await;

    let signature = update_state(&program, &created, &creator, "Completed")
        .await
        .unwrap();

    let project: Project = program
        .fetch_account("Project", &created.project.pubkey())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.state, ProjectState::Completed);

    let details = program
        .provider()
        .rpc()
        .get_transaction(&signature)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.events[0]["name"], "ProjectStateUpdated");
    assert_eq!(details.events[0]["data"]["new_state"], "Completed");

    // Completed can still move on.
    update_state(&program, &created, &creator, "Cancelled")
        .await
        .unwrap();

    cluster.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_by_other_signer_violates_has_one() {
    let cluster = TestCluster::start().await.unwrap();
    let program = cluster.program().unwrap();
    let created = create_project(&program, "Delta", 5).await;

    let stranger = Keypair::generate();
    let err = update_state(&program, &created, &stranger, "Cancelled")
        .await
        .unwrap_err();
    assert_eq!(err.custom_program_error(), Some(2001));
    assert!(err
        .logs()
        .unwrap()
        .iter()
        .any(|l| l.contains("ConstraintHasOne")));

    let project: Project = program
        .fetch_account("Project", &created.project.pubkey())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.state, ProjectState::Active);

    cluster.shutdown().await.unwrap();
}
