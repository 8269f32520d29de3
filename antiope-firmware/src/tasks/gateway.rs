//! Feed gateway task
//!
//! Sends fetch requests to the feed gateway over UART1 and assembles
//! the streamed responses into article sets for the controller. Also
//! receives the gateway's time-of-day broadcasts.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Async, UartRx, UartTx};

use antiope_core::cache::{Article, ArticleSet};
use antiope_core::clock::TimeOfDay;
use antiope_core::page::Category;
use antiope_protocol::{FrameParser, GatewayMessage, GatewayRequest};

use crate::channels::{FeedDelivery, FEED_CHANNEL, FETCH_CHANNEL, TIME_SYNC};

/// A delivery being assembled from the response stream
struct Collector {
    category: Category,
    generation: u16,
    articles: ArticleSet,
}

/// Gateway task - fetch requests out, feed streams and time sync in
#[embassy_executor::task]
pub async fn gateway_task(
    mut tx: UartTx<'static, UART1, Async>,
    mut rx: UartRx<'static, UART1, Async>,
) {
    info!("Gateway task started");

    let mut parser = FrameParser::new();
    let mut collector: Option<Collector> = None;

    loop {
        match select(FETCH_CHANNEL.receive(), read_byte(&mut rx)).await {
            Either::First(request) => {
                debug!(
                    "Fetching {:?} (generation {})",
                    request.category, request.generation
                );
                let msg = GatewayRequest::FetchFeed {
                    category: request.category.code(),
                    generation: request.generation,
                };
                if let Ok(frame) = msg.to_frame() {
                    let mut buf = [0u8; 8];
                    if let Ok(len) = frame.encode(&mut buf) {
                        if let Err(e) = tx.write(&buf[..len]).await {
                            warn!("Failed to send fetch request: {:?}", e);
                        }
                    }
                }
            }
            Either::Second(Ok(byte)) => match parser.feed(byte) {
                Ok(Some(frame)) => match GatewayMessage::from_frame(&frame) {
                    Ok(msg) => handle_message(msg, &mut collector).await,
                    Err(e) => warn!("Bad gateway frame: {:?}", e),
                },
                Ok(None) => {}
                Err(e) => warn!("Gateway frame parse error: {:?}", e),
            },
            Either::Second(Err(e)) => {
                warn!("Gateway UART read error: {:?}", e);
            }
        }
    }
}

async fn read_byte(rx: &mut UartRx<'static, UART1, Async>) -> Result<u8, embassy_rp::uart::Error> {
    let mut byte = [0u8; 1];
    rx.read(&mut byte).await.map(|_| byte[0])
}

/// Apply one gateway message to the collector state
async fn handle_message(msg: GatewayMessage<'_>, collector: &mut Option<Collector>) {
    match msg {
        GatewayMessage::TimeSync {
            hour,
            minute,
            second,
        } => {
            trace!("Time sync {}:{}:{}", hour, minute, second);
            TIME_SYNC.signal(TimeOfDay::new(hour, minute, second));
        }
        GatewayMessage::FeedStart {
            category,
            generation,
            count,
        } => match Category::from_code(category) {
            Some(category) => {
                debug!("Feed start {:?}: {} articles", category, count);
                *collector = Some(Collector {
                    category,
                    generation,
                    articles: ArticleSet::new(),
                });
            }
            None => warn!("Feed start for unknown category {}", category),
        },
        GatewayMessage::FeedTitle {
            category,
            generation,
            text,
            ..
        } => {
            if let Some(c) = matching(collector, category, generation) {
                // Articles arrive in order; excess ones are dropped
                let _ = c.articles.push(Article::new(text));
            }
        }
        GatewayMessage::FeedLine {
            category,
            generation,
            text,
            ..
        } => {
            if let Some(c) = matching(collector, category, generation) {
                if let Some(article) = c.articles.last_mut() {
                    article.push_line(text);
                }
            }
        }
        GatewayMessage::FeedEnd {
            category,
            generation,
        } => {
            if let Some(c) = take_matching(collector, category, generation) {
                debug!("Feed complete: {} articles", c.articles.len());
                FEED_CHANNEL
                    .send(FeedDelivery {
                        category: c.category,
                        generation: c.generation,
                        articles: Some(c.articles),
                    })
                    .await;
            }
        }
        GatewayMessage::FeedFail {
            category,
            generation,
        } => {
            if let Some(c) = take_matching(collector, category, generation) {
                warn!("Feed failed for {:?}", c.category);
                FEED_CHANNEL
                    .send(FeedDelivery {
                        category: c.category,
                        generation: c.generation,
                        articles: None,
                    })
                    .await;
            }
        }
    }
}

/// Borrow the collector if it matches this frame's category and generation
fn matching<'a>(
    collector: &'a mut Option<Collector>,
    category: u8,
    generation: u16,
) -> Option<&'a mut Collector> {
    collector
        .as_mut()
        .filter(|c| c.category.code() == category && c.generation == generation)
}

/// Take the collector out if it matches this frame's category and generation
fn take_matching(
    collector: &mut Option<Collector>,
    category: u8,
    generation: u16,
) -> Option<Collector> {
    if matching(collector, category, generation).is_some() {
        collector.take()
    } else {
        None
    }
}
