mod common;

use common::{checking, start};

use bank::ids::AccountId;
use bank::{BankError, Missing, Money};

use chrono::Duration;

#[test]
fn completed_transfer_moves_exactly_the_amount() {
    let harness = start();
    let alice = harness.client_with("alice", 800);
    let bob = harness.client_with("bob", 300);
    let (from, to) = (checking(&alice), checking(&bob));

    let transaction = harness
        .bank
        .transactions()
        .transfer_funds(from, to, Money::parse("123.45").unwrap(), &alice)
        .unwrap();

    assert_eq!(transaction.amount, Money(1_234_500));
    assert_eq!(harness.balance(from), Money(6_765_500));
    assert_eq!(harness.balance(to), Money(4_234_500));
    assert_eq!(transaction.timestamp, common::opening_day());
}

#[test]
fn overdrawing_transfer_changes_nothing() {
    let harness = start();
    let alice = harness.client_with("alice", 100);
    let bob = harness.client_with("bob", 0);
    let (from, to) = (checking(&alice), checking(&bob));

    let result = harness
        .bank
        .transactions()
        .transfer_funds(from, to, Money::whole(101), &alice);

    assert_eq!(
        result,
        Err(BankError::InsufficientFunds {
            account: from,
            requested: Money::whole(101),
            available: Money::whole(100),
        })
    );
    assert_eq!(harness.balance(from), Money::whole(100));
    assert_eq!(harness.balance(to), Money::ZERO);
    assert!(harness.bank.transactions().outgoing_for(from).is_empty());
}

#[test]
fn non_positive_amounts_are_rejected() {
    let harness = start();
    let alice = harness.client_with("alice", 100);
    let bob = harness.client_with("bob", 0);

    let result = harness.bank.transactions().transfer_funds(
        checking(&alice),
        checking(&bob),
        Money::ZERO,
        &alice,
    );

    assert!(matches!(result, Err(BankError::InvalidAmount(_))));
}

#[test]
fn missing_accounts_name_their_side() {
    let harness = start();
    let alice = harness.client_with("alice", 100);

    assert_eq!(
        harness.bank.transactions().transfer_funds(
            AccountId(404),
            checking(&alice),
            Money::whole(1),
            &alice
        ),
        Err(BankError::NotFound(Missing::SenderAccount(AccountId(404))))
    );
    assert_eq!(
        harness.bank.transactions().transfer_funds(
            checking(&alice),
            AccountId(404),
            Money::whole(1),
            &alice
        ),
        Err(BankError::NotFound(Missing::ReceiverAccount(AccountId(404))))
    );
}

#[test]
fn admin_may_move_money_between_any_accounts() {
    let harness = start();
    let alice = harness.client_with("alice", 100);
    let bob = harness.client_with("bob", 0);

    harness
        .bank
        .transactions()
        .transfer_funds(checking(&alice), checking(&bob), Money::whole(60), &harness.admin)
        .unwrap();

    assert_eq!(harness.balance(checking(&bob)), Money::whole(60));
}

#[test]
fn listings() {
    let harness = start();
    let alice = harness.client_with("alice", 100);
    let bob = harness.client_with("bob", 100);
    let transactions = harness.bank.transactions();

    let first = transactions
        .transfer_funds(checking(&alice), checking(&bob), Money::whole(10), &alice)
        .unwrap();

    harness.clock.set(common::opening_day() + Duration::hours(1));

    let second = transactions
        .transfer_funds(checking(&bob), checking(&alice), Money::whole(20), &bob)
        .unwrap();

    assert_eq!(transactions.outgoing_of(&alice), Ok(vec![first.clone()]));
    assert_eq!(transactions.incoming_of(&alice), Ok(vec![second.clone()]));

    assert!(matches!(
        transactions.all(&alice),
        Err(BankError::PermissionDenied(_))
    ));

    // funding the reserve and the two accounts are not transactions between accounts
    assert_eq!(transactions.all(&harness.admin), Ok(vec![second, first]));
}

#[test]
fn sending_to_the_same_account() {
    let harness = start();
    let alice = harness.client_with("alice", 100);

    assert_eq!(
        harness.bank.transactions().transfer_funds(
            checking(&alice),
            checking(&alice),
            Money::whole(1),
            &alice
        ),
        Err(BankError::SameAccount(checking(&alice)))
    );
}

#[test]
fn account_history_by_number() {
    let harness = start();
    let alice = harness.client_with("alice", 100);
    let bob = harness.client_with("bob", 100);
    let carol = harness.client_with("carol", 100);
    let transactions = harness.bank.transactions();

    let to_bob = transactions
        .transfer_funds(checking(&alice), checking(&bob), Money::whole(1), &alice)
        .unwrap();
    transactions
        .transfer_funds(checking(&carol), checking(&alice), Money::whole(2), &carol)
        .unwrap();
    let from_bob = transactions
        .transfer_funds(checking(&bob), checking(&carol), Money::whole(3), &bob)
        .unwrap();

    // root, alice, bob: bob's checking account is the third one opened for a client
    assert_eq!(
        transactions.for_account_number("CHK-00000003", &harness.admin),
        Ok(vec![from_bob, to_bob])
    );

    assert!(matches!(
        transactions.for_account_number("CHK-00000003", &bob),
        Err(BankError::PermissionDenied(_))
    ));
    assert_eq!(
        transactions.for_account_number("NOPE", &harness.admin),
        Err(BankError::NotFound(Missing::AccountNumber("NOPE".to_string())))
    );
}

#[test]
fn client_owns_only_their_checking_account() {
    let harness = start();
    let alice = harness.client_with("alice", 0);

    let accounts = harness.bank.accounts_of(&alice);

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, checking(&alice));
    assert!(harness.bank.accounts_of(&harness.admin)[0].is_owned_by(harness.admin.id));
}
