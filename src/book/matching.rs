//! The matching algorithm proper: MARKET BUY/SELL sweep, LIMIT dispatch,
//! and resting-order creation (spec.md §4.3).

use crate::ids::{OrderId, Price, Shares, UserId};
use crate::ledger::Ledger;

use super::book::{Book, OrderLocation};
use super::order::{RestingOrder, Side};

/// One executed fill, for callers that want to react to trades beyond
/// what the ledger already recorded (e.g. logging, notifications).
#[derive(Debug, Clone)]
pub struct Fill {
    pub price: Price,
    pub shares: Shares,
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub resting_order_id: OrderId,
}

impl Book {
    /// Sweep the opposite side for up to `shares`, aggressing at
    /// whatever price is available, best price first. Any residual after
    /// the book is exhausted is silently dropped — a market order never
    /// rests (spec.md §4.3 MARKET BUY/SELL).
    ///
    /// A ledger refusal for one resting order is treated as if that
    /// order did not exist: it is left untouched and the sweep tries the
    /// next eligible resting order, without updating `last_price` for
    /// the refused portion (spec.md §4.6, §7).
    pub fn match_market(
        &self,
        aggressor_side: Side,
        mut shares: Shares,
        aggressor_user: UserId,
        ledger: &Ledger,
    ) -> Vec<Fill> {
        let mut fills = Vec::new();
        let tree = self.tree_for(aggressor_side.opposite());

        for (price, level) in tree.levels_best_first() {
            if shares == 0 {
                break;
            }

            let outcome = level.fill(shares, |_resting_id, resting_user, f| {
                let (buyer_id, seller_id) = match aggressor_side {
                    Side::Buy => (aggressor_user, resting_user),
                    Side::Sell => (resting_user, aggressor_user),
                };
                ledger
                    .record_trade(self.asset_id, f, price, buyer_id, seller_id)
                    .is_some()
            });

            for level_fill in &outcome.fills {
                if level_fill.order_fully_consumed {
                    self.order_index.remove(&level_fill.order_id);
                }
                let (buyer_id, seller_id) = match aggressor_side {
                    Side::Buy => (aggressor_user, level_fill.user_id),
                    Side::Sell => (level_fill.user_id, aggressor_user),
                };
                fills.push(Fill {
                    price,
                    shares: level_fill.shares,
                    buyer_id,
                    seller_id,
                    resting_order_id: level_fill.order_id,
                });
            }

            if outcome.shares_filled > 0 {
                self.set_last_price(price);
                shares -= outcome.shares_filled;
            }

            if outcome.level_empty {
                tree.remove_if_empty(price);
            }
        }

        fills
    }

    /// LIMIT BUY/SELL dispatch (spec.md §4.3). If the order is marketable
    /// at submission time it is executed exactly like a market order for
    /// the full requested quantity — including sweeping through prices
    /// worse than `limit_price` if the best-quote level alone can't fill
    /// it — and any residual is dropped, not rested. This mirrors the
    /// source system's behavior and is the spec's explicitly-documented,
    /// strictly-conforming choice (spec.md §4.3, §9; SPEC_FULL.md §11).
    /// Otherwise the order rests at `limit_price`.
    pub fn process_limit(
        &self,
        side: Side,
        shares: Shares,
        limit_price: Price,
        user_id: UserId,
        ledger: &Ledger,
    ) -> Vec<Fill> {
        if self.is_marketable(side, limit_price) {
            self.match_market(side, shares, user_id, ledger)
        } else {
            self.rest_order(side, shares, limit_price, user_id);
            Vec::new()
        }
    }

    fn rest_order(&self, side: Side, shares: Shares, price: Price, user_id: UserId) {
        let order_id = self.ids.next_id();
        let order = RestingOrder {
            order_id,
            side,
            price,
            shares_remaining: shares,
            entry_time: crate::utils::current_time_millis(),
            user_id,
        };
        let tree = self.tree_for(side);
        let level = tree.get_or_create(price);
        level.append(order);
        self.order_index.insert(order_id, OrderLocation { price, side });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserRegistry;
    use std::sync::Arc;

    fn setup() -> (Book, Ledger, UserId, UserId) {
        let users = Arc::new(UserRegistry::new());
        let buyer = users.create("buyer");
        let seller = users.create("seller");
        users.deposit(buyer, 1_000_000).unwrap();
        users.grant_shares(seller, 1, 1_000);
        let ledger = Ledger::new(users);
        (Book::new(1), ledger, buyer, seller)
    }

    /// S2 — simple cross.
    #[test]
    fn simple_cross() {
        let (book, ledger, buyer, seller) = setup();
        book.process_limit(Side::Sell, 100, 50, seller, &ledger);
        let fills = book.process_limit(Side::Buy, 40, 50, buyer, &ledger);

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].shares, 40);
        assert_eq!(fills[0].price, 50);
        assert_eq!(book.best_ask(), Some(50));
        assert_eq!(book.asks.get(50).unwrap().total_volume(), 60);
        assert_eq!(book.last_price(), 50);
    }

    /// S3 — multi-level sweep.
    #[test]
    fn multi_level_sweep() {
        let (book, ledger, buyer, seller) = setup();
        book.process_limit(Side::Sell, 30, 50, seller, &ledger);
        book.process_limit(Side::Sell, 50, 51, seller, &ledger);
        book.process_limit(Side::Sell, 20, 52, seller, &ledger);

        let fills = book.match_market(Side::Buy, 70, buyer, &ledger);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].shares, 30);
        assert_eq!(fills[0].price, 50);
        assert_eq!(fills[1].shares, 40);
        assert_eq!(fills[1].price, 51);
        assert_eq!(book.last_price(), 51);

        let remaining = book.snapshot().asks;
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].price, 51);
        assert_eq!(remaining[0].volume, 10);
        assert_eq!(remaining[1].price, 52);
        assert_eq!(remaining[1].volume, 20);
    }

    /// S4 — FIFO at a level.
    #[test]
    fn fifo_within_a_level() {
        let (book, ledger, buyer, seller) = setup();
        book.process_limit(Side::Buy, 20, 40, buyer, &ledger); // X, earlier
        book.process_limit(Side::Buy, 20, 40, buyer, &ledger); // Y, later

        let fills = book.match_market(Side::Sell, 25, seller, &ledger);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].shares, 20);
        assert_eq!(fills[1].shares, 5);
        assert_eq!(book.best_bid(), Some(40));
        let level = book.bids.get(40).unwrap();
        assert_eq!(level.size(), 1);
        assert_eq!(level.total_volume(), 15);
    }

    /// S5 — marketable limit gets price improvement, not its own limit.
    #[test]
    fn marketable_limit_gets_price_improvement() {
        let (book, ledger, buyer, seller) = setup();
        book.process_limit(Side::Sell, 10, 50, seller, &ledger);

        let fills = book.process_limit(Side::Buy, 10, 55, buyer, &ledger);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].price, 50);
        assert_eq!(book.last_price(), 50);
        assert!(book.best_ask().is_none());
    }

    /// S6 — cancel then refill.
    #[test]
    fn cancel_then_refill() {
        let (book, ledger, buyer, seller) = setup();
        book.process_limit(Side::Buy, 10, 30, buyer, &ledger); // X
        book.process_limit(Side::Buy, 10, 30, buyer, &ledger); // Y
        book.process_limit(Side::Buy, 10, 30, buyer, &ledger); // Z

        let level = book.bids.get(30).unwrap();
        let y_id = {
            let snap = book.snapshot();
            assert_eq!(snap.bids[0].size, 3);
            // Y is the second order inserted; fetch via order_index ordering.
            2
        };
        let _ = y_id;
        // Cancel the second order (Y) directly through order_index lookup.
        let mut ids: Vec<_> = book.order_index.iter().map(|e| *e.key()).collect();
        ids.sort();
        let y = ids[1];
        assert!(book.cancel(y));
        assert_eq!(level.size(), 2);

        let fills = book.match_market(Side::Sell, 11, seller, &ledger);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].shares, 10);
        assert_eq!(fills[1].shares, 1);
        assert!(!fills.iter().any(|f| f.resting_order_id == y));
    }

    /// Ledger refusal skips a resting order without cancelling it.
    #[test]
    fn ledger_refusal_skips_without_removing() {
        let (book, ledger, buyer, _seller) = setup();
        let poor_seller = {
            // a seller with no shares at all for this asset
            let users = Arc::new(UserRegistry::new());
            users.create("poor")
        };
        // Can't reuse `ledger`'s registry directly here; instead exercise
        // refusal through the book with a seller who owns nothing.
        let _ = poor_seller;

        let users = Arc::new(UserRegistry::new());
        let rich_buyer = users.create("rich_buyer");
        users.deposit(rich_buyer, 1_000_000).unwrap();
        let broke_seller = users.create("broke_seller"); // never granted shares
        let funded_seller = users.create("funded_seller");
        users.grant_shares(funded_seller, 1, 100);
        let ledger2 = Ledger::new(users);

        let book2 = Book::new(1);
        book2.process_limit(Side::Sell, 10, 50, broke_seller, &ledger2);
        book2.process_limit(Side::Sell, 10, 50, funded_seller, &ledger2);

        let fills = book2.match_market(Side::Buy, 10, rich_buyer, &ledger2);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].seller_id, funded_seller);

        // broke_seller's order is still resting, untouched.
        let level = book2.asks.get(50).unwrap();
        assert_eq!(level.size(), 1);
        assert_eq!(level.total_volume(), 10);
        let _ = buyer;
    }
}
