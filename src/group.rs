//! Fan-out over several channels of one controller.

use crate::channel::{Channel, ChannelId};
use crate::error::{Result, Rx09Error};
use futures::future::try_join_all;
use std::future::Future;
use tokio::task::JoinHandle;

/// Borrowed view over a set of channels.
///
/// Each operation runs on every member as its own task and resolves when all
/// members succeed, or with the first member error. A failing member does not
/// cancel its siblings: their tasks keep running and their telegrams still
/// reach the port.
#[derive(Debug, Clone)]
pub struct ChannelGroup<'a> {
    channels: Vec<&'a Channel>,
}

impl<'a> ChannelGroup<'a> {
    pub(crate) fn new(channels: Vec<&'a Channel>) -> Self {
        Self { channels }
    }

    /// Member channels in the order they were requested.
    pub fn channels(&self) -> &[&'a Channel] {
        &self.channels
    }

    /// Ids of the member channels, in order.
    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.channels.iter().map(|channel| channel.id()).collect()
    }

    /// Number of member channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Raise every member.
    pub async fn up(&self) -> Result<()> {
        run_all(self.channels.iter().map(|&channel| {
            let channel = channel.clone();
            async move { channel.up().await }
        }))
        .await
    }

    /// Lower every member.
    pub async fn down(&self) -> Result<()> {
        run_all(self.channels.iter().map(|&channel| {
            let channel = channel.clone();
            async move { channel.down().await }
        }))
        .await
    }

    /// Stop every member.
    ///
    /// Members share the controller's stop slot, so the telegrams go out one by
    /// one at the stop spacing, in member order. Like
    /// [`Channel::stop`], the slots are reserved when this is called.
    pub fn stop(&self) -> impl Future<Output = Result<()>> + Send + 'static {
        let stops: Vec<_> = self.channels.iter().map(|channel| channel.stop()).collect();
        run_all(stops)
    }
}

/// Spawn every member future and join the results.
async fn run_all<I>(members: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Future<Output = Result<()>> + Send + 'static,
{
    let tasks: Vec<_> = members
        .into_iter()
        .map(|member| join_member(tokio::spawn(member)))
        .collect();

    // Dropping the remaining handles on early failure detaches the tasks.
    try_join_all(tasks).await?;
    Ok(())
}

async fn join_member(task: JoinHandle<Result<()>>) -> Result<()> {
    task.await
        .map_err(|e| Rx09Error::TaskFailed(e.to_string()))?
}
