//! Startup population: seed users with random cash, seed books with
//! random resting depth (SPEC_FULL.md §9, grounded in
//! `original_source/users/ledger.go` and `original_source/assets/assets.go`,
//! both named `populate()` in the Go original).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::book::{Book, Side};
use crate::ids::{AssetId, Price, Shares, UserId};
use crate::ledger::Ledger;
use crate::users::UserRegistry;

const SEED_USER_COUNT: usize = 20;
const SEED_CASH_MAX: u64 = 100_000;
const SEED_BOOK_DEPTH: usize = 2_000;
const SEED_SPREAD_TICKS: i64 = 50;
const SEED_MAX_SHARES: Shares = 100;

/// Create `SEED_USER_COUNT` named users with random cash in
/// `[0, 100_000)`. Not part of the external contract (spec.md §6: "the
/// exact seed population is not observable").
pub fn seed_users(registry: &UserRegistry) -> Vec<UserId> {
    let mut rng = rand::thread_rng();
    (0..SEED_USER_COUNT)
        .map(|i| {
            let user_id = registry.create(format!("seed-user-{i}"));
            let cash = rng.gen_range(0..SEED_CASH_MAX);
            if cash > 0 {
                registry.deposit(user_id, cash).expect("seed deposit");
            }
            user_id
        })
        .collect()
}

/// Seed a freshly created book with random resting orders around
/// `mid_price` so it has visible depth at boot. Sellers are granted
/// enough shares up front to cover what they rest, so an incidental
/// cross during seeding isn't refused by the ledger for reasons
/// unrelated to whatever scenario runs against the book afterward.
pub fn seed_book(
    book: &Book,
    users: &UserRegistry,
    ledger: &Ledger,
    asset_id: AssetId,
    seed_user_ids: &[UserId],
    mid_price: Price,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..SEED_BOOK_DEPTH {
        let Some(&user_id) = seed_user_ids.choose(&mut rng) else {
            return;
        };
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let offset = rng.gen_range(-SEED_SPREAD_TICKS..=SEED_SPREAD_TICKS);
        let price = (mid_price as i64 + offset).max(1) as Price;
        let shares = rng.gen_range(1..=SEED_MAX_SHARES);

        if side == Side::Sell {
            users.grant_shares(user_id, asset_id, shares);
        }

        book.process_limit(side, shares, price, user_id, ledger);
    }
}
