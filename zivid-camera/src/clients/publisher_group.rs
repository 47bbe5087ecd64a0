use std::{fmt, sync::Arc};

use tracing::warn;

use crate::{
    error::Error,
    msg::{Capture2DOutput, CaptureOutput},
    traits::CapturePublisher,
};

/// Forwards every capture to each of its publishers, in order.
#[derive(Default, Clone)]
pub struct PublisherGroup {
    publishers: Vec<Arc<dyn CapturePublisher>>,
}

impl fmt::Debug for PublisherGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublisherGroup")
            .field("len", &self.publishers.len())
            .finish()
    }
}

impl PublisherGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, publisher: Arc<dyn CapturePublisher>) {
        self.publishers.push(publisher);
    }

    /// Calls `f` for every publisher even if some fail, and returns the first error.
    fn for_each(
        &self,
        mut f: impl FnMut(&dyn CapturePublisher) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut result = Ok(());
        for publisher in &self.publishers {
            if let Err(e) = f(publisher.as_ref()) {
                warn!("Failed to publish: {}", e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}

impl CapturePublisher for PublisherGroup {
    fn publish(&self, output: CaptureOutput) -> Result<(), Error> {
        self.for_each(|p| p.publish(output.clone()))
    }

    fn publish_2d(&self, output: Capture2DOutput) -> Result<(), Error> {
        self.for_each(|p| p.publish_2d(output.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clients::TopicPublisher, msg::CameraInfo, msg::Image};

    struct FailingPublisher;

    impl CapturePublisher for FailingPublisher {
        fn publish(&self, _: CaptureOutput) -> Result<(), Error> {
            Err(anyhow::anyhow!("broken").into())
        }

        fn publish_2d(&self, _: Capture2DOutput) -> Result<(), Error> {
            Err(anyhow::anyhow!("broken").into())
        }
    }

    #[test]
    fn test_failure_does_not_stop_others() {
        let topics = Arc::new(TopicPublisher::new());
        let mut group = PublisherGroup::new();
        group.push(Arc::new(FailingPublisher));
        group.push(topics.clone());
        let output = Capture2DOutput {
            color_camera_info: CameraInfo::default(),
            color_image: Image::default(),
        };
        assert!(group.publish_2d(output).is_err());
        assert_eq!(topics.color_image_color.num_published(), 1);
    }
}
