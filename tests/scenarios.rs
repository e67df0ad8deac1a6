//! End-to-end scenarios through the intake queue (spec.md §8), exercised
//! against a real matcher task rather than calling `Book` methods
//! directly, to cover the C4 queue/worker boundary as well as matching.

use std::sync::Arc;
use std::time::Duration;

use exchange_engine::book::{Book, OrderType, Side, TimeInForce};
use exchange_engine::ledger::Ledger;
use exchange_engine::matcher::{MatcherHandle, OrderRequest};
use exchange_engine::users::UserRegistry;

fn request(side: Side, order_type: OrderType, shares: u64, limit_price: Option<u64>, user_id: u64) -> OrderRequest {
    OrderRequest {
        side,
        order_type,
        shares,
        limit_price,
        user_id,
        time_in_force: TimeInForce::Day,
    }
}

async fn settle() {
    // give the matcher task a chance to drain the channel
    tokio::time::sleep(Duration::from_millis(20)).await;
}

/// S1 — an empty book never rests or fills a market order; the 406
/// rejection itself lives in the HTTP layer (spec.md §6/§8), so this
/// checks the book-level postcondition: nothing happens, last_price
/// stays 0.
#[tokio::test]
async fn s1_empty_book_market_order_is_a_no_op() {
    let users = Arc::new(UserRegistry::new());
    let buyer = users.create("buyer");
    let ledger = Arc::new(Ledger::new(Arc::clone(&users)));
    let book = Arc::new(Book::new(1));
    let handle = MatcherHandle::spawn(book, ledger, 30);

    handle
        .submit(request(Side::Buy, OrderType::Market, 10, None, buyer))
        .await
        .unwrap();
    settle().await;

    assert_eq!(handle.book().last_price(), 0);
    assert!(handle.book().best_bid().is_none());
}

/// S6 — cancel then refill: cancelling Y leaves X and Z to absorb a
/// market sell, in FIFO order, entirely through the queue.
#[tokio::test]
async fn s6_cancel_then_refill_through_the_queue() {
    let users = Arc::new(UserRegistry::new());
    let buyer_x = users.create("x");
    let buyer_y = users.create("y");
    let buyer_z = users.create("z");
    let seller = users.create("seller");
    users.grant_shares(seller, 1, 1_000);
    let ledger = Arc::new(Ledger::new(Arc::clone(&users)));
    let book = Arc::new(Book::new(1));
    let handle = MatcherHandle::spawn(Arc::clone(&book), Arc::clone(&ledger), 30);

    handle
        .submit(request(Side::Buy, OrderType::Limit, 10, Some(30), buyer_x))
        .await
        .unwrap();
    settle().await;
    handle
        .submit(request(Side::Buy, OrderType::Limit, 10, Some(30), buyer_y))
        .await
        .unwrap();
    settle().await;
    handle
        .submit(request(Side::Buy, OrderType::Limit, 10, Some(30), buyer_z))
        .await
        .unwrap();
    settle().await;

    let mut ids: Vec<_> = book.resting_order_ids();
    ids.sort();
    assert_eq!(ids.len(), 3);
    let y_order_id = ids[1];
    assert!(handle.cancel(y_order_id).await.unwrap());

    handle
        .submit(request(Side::Sell, OrderType::Market, 11, None, seller))
        .await
        .unwrap();
    settle().await;

    let trades = ledger.user_history(seller);
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].shares, 10);
    assert_eq!(trades[1].shares, 1);
    assert!(!trades.iter().any(|t| t.buyer_id == buyer_y));
}

/// The intake queue backpressures rather than drops: a full channel
/// makes `submit` wait, not error.
#[tokio::test]
async fn intake_backpressure_does_not_drop_requests() {
    let users = Arc::new(UserRegistry::new());
    let buyer = users.create("buyer");
    let ledger = Arc::new(Ledger::new(Arc::clone(&users)));
    let book = Arc::new(Book::new(1));
    let handle = MatcherHandle::spawn(book, ledger, 1);

    for _ in 0..20 {
        handle
            .submit(request(Side::Buy, OrderType::Limit, 1, Some(10), buyer))
            .await
            .unwrap();
    }
    settle().await;

    let snap = handle.book().snapshot();
    let total: u64 = snap.bids.iter().map(|l| l.volume).sum();
    assert_eq!(total, 20);
}
