//! Export service
//!
//! One fetch → build → serialize → write cycle. Both feeds are fetched
//! concurrently; if either fails the run stops before anything is written.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::Category;
use kml::{DEFAULT_DOCUMENT_NAME, DocumentBuilder, KmlError};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{FeedPort, OutputSink};

/// Common size limit of KML consumers
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// KML document name
    pub document_name: String,
    /// Largest document that may be written
    pub max_bytes: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Result of a successful export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Timestamp stamped into the document
    pub generated_at: DateTime<Utc>,
    /// Traffic event placemarks written
    pub events: usize,
    /// Ferry placemarks written
    pub ferries: usize,
    /// Feed entries skipped as malformed
    pub skipped: usize,
    /// Placemarks per category, in document order
    pub categories: Vec<(Category, usize)>,
    /// Size of the written document
    pub bytes: usize,
    /// Where the document was written
    pub location: String,
}

impl ExportSummary {
    /// Total placemarks written
    #[must_use]
    pub const fn placemarks(&self) -> usize {
        self.events + self.ferries
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} placemarks ({} events, {} ferries) to {} ({} bytes)",
            self.placemarks(),
            self.events,
            self.ferries,
            self.location,
            self.bytes
        )?;
        for (category, count) in &self.categories {
            writeln!(f, "  {category}: {count}")?;
        }
        if self.skipped > 0 {
            writeln!(f, "  Skipped records: {}", self.skipped)?;
        }
        Ok(())
    }
}

/// Runs export cycles against a feed and an output sink
pub struct ExportService {
    feeds: Arc<dyn FeedPort>,
    sink: Arc<dyn OutputSink>,
    config: ExportConfig,
}

impl fmt::Debug for ExportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportService")
            .field("sink", &self.sink.location())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ExportService {
    /// Create a new export service with default settings
    #[must_use]
    pub fn new(feeds: Arc<dyn FeedPort>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            feeds,
            sink,
            config: ExportConfig::default(),
        }
    }

    /// Set the export settings
    #[must_use]
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one export cycle stamped with the current time
    ///
    /// # Errors
    ///
    /// See [`ExportService::run_at`].
    pub async fn run(&self) -> Result<ExportSummary, ApplicationError> {
        self.run_at(Utc::now()).await
    }

    /// Run one export cycle stamped with `generated_at`
    ///
    /// # Errors
    ///
    /// Returns an error if either feed fails, the document cannot be
    /// serialized or does not read back, it exceeds the size limit, or the
    /// sink fails. The sink is not called in any of the earlier cases.
    #[instrument(skip(self))]
    pub async fn run_at(
        &self,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportSummary, ApplicationError> {
        let (events, ferries) =
            tokio::try_join!(self.feeds.traffic_events(), self.feeds.ferry_routes())?;
        debug!(
            events = events.records.len(),
            ferries = ferries.records.len(),
            "Feeds fetched"
        );

        let mut builder =
            DocumentBuilder::new(self.config.document_name.as_str()).generated_at(generated_at);
        for event in &events.records {
            builder.push_event(event);
        }
        for ferry in &ferries.records {
            builder.push_ferry(ferry);
        }
        let document = builder.build();

        let xml = kml::serialize(&document)?;
        let readback = kml::outline(&xml)?;
        if readback.placemark_count() != document.placemark_count() {
            return Err(KmlError::Structure(format!(
                "wrote {} placemarks but read back {}",
                document.placemark_count(),
                readback.placemark_count()
            ))
            .into());
        }

        if xml.len() > self.config.max_bytes {
            warn!(
                size = xml.len(),
                limit = self.config.max_bytes,
                "Document exceeds size limit, not writing"
            );
            return Err(ApplicationError::OutputTooLarge {
                size: xml.len(),
                limit: self.config.max_bytes,
            });
        }

        self.sink.write(&xml).await?;

        let summary = ExportSummary {
            generated_at,
            events: events.records.len(),
            ferries: ferries.records.len(),
            skipped: events.skipped + ferries.skipped,
            categories: document.category_counts(),
            bytes: xml.len(),
            location: self.sink.location(),
        };
        info!(
            events = summary.events,
            ferries = summary.ferries,
            skipped = summary.skipped,
            bytes = summary.bytes,
            "Export complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FeedBatch, MockFeedPort, MockOutputSink};
    use chrono::TimeZone;
    use domain::{Coordinate, EventType, FerryRoute, FerryType, Geometry, TrafficEvent};
    use std::sync::Mutex;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 15, 0, 0).unwrap()
    }

    fn event(id: &str, event_type: EventType) -> TrafficEvent {
        TrafficEvent::new(
            id,
            event_type,
            Geometry::Point(Coordinate::new(-123.1, 49.2).unwrap()),
        )
    }

    fn ferry(name: &str) -> FerryRoute {
        FerryRoute::new(
            name,
            FerryType::Cable,
            Coordinate::new(-121.95, 50.35).unwrap(),
        )
    }

    fn feeds(events: Vec<TrafficEvent>, ferries: Vec<FerryRoute>) -> MockFeedPort {
        let mut mock = MockFeedPort::new();
        mock.expect_traffic_events()
            .returning(move || Ok(FeedBatch::new(events.clone()).with_skipped(1)));
        mock.expect_ferry_routes()
            .returning(move || Ok(FeedBatch::new(ferries.clone())));
        mock
    }

    struct MemorySink {
        written: Mutex<Vec<String>>,
    }

    impl MemorySink {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl OutputSink for MemorySink {
        async fn write(&self, contents: &str) -> Result<(), ApplicationError> {
            self.written.lock().unwrap().push(contents.to_string());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    #[tokio::test]
    async fn test_run_writes_document() {
        let sink = Arc::new(MemorySink::new());
        let service = ExportService::new(
            Arc::new(feeds(
                vec![
                    event("EVT1", EventType::Construction),
                    event("EVT2", EventType::Construction),
                ],
                vec![ferry("Lytton Ferry")],
            )),
            sink.clone(),
        );

        let summary = service.run_at(at()).await.unwrap();
        assert_eq!(summary.events, 2);
        assert_eq!(summary.ferries, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.location, "memory");
        assert_eq!(
            summary.categories,
            vec![
                (Category::Event(EventType::Construction), 2),
                (Category::Ferry(FerryType::Cable), 1),
            ]
        );

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(summary.bytes, written[0].len());
        assert!(written[0].contains("<name>EVT1</name>"));
        assert!(written[0].contains("Generated 2025-08-20 15:00:00 UTC"));
    }

    #[tokio::test]
    async fn test_empty_feeds_still_write() {
        let mut sink = MockOutputSink::new();
        sink.expect_write()
            .withf(|xml| xml.contains("<name>Traffic Events</name>"))
            .times(1)
            .returning(|_| Ok(()));
        sink.expect_location()
            .returning(|| "out.kml".to_string());

        let service = ExportService::new(Arc::new(feeds(vec![], vec![])), Arc::new(sink));
        let summary = service.run_at(at()).await.unwrap();
        assert_eq!(summary.placemarks(), 0);
    }

    #[tokio::test]
    async fn test_parse_error_skips_write() {
        let mut feeds = MockFeedPort::new();
        feeds
            .expect_traffic_events()
            .returning(|| Err(ApplicationError::Parse("expected value at line 1".to_string())));
        feeds
            .expect_ferry_routes()
            .returning(|| Ok(FeedBatch::default()));

        let mut sink = MockOutputSink::new();
        sink.expect_write().never();
        sink.expect_location()
            .returning(|| "out.kml".to_string());

        let service = ExportService::new(Arc::new(feeds), Arc::new(sink));
        let err = service.run_at(at()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Parse(_)));
    }

    #[tokio::test]
    async fn test_ferry_network_error_skips_write() {
        let mut feeds = MockFeedPort::new();
        feeds
            .expect_traffic_events()
            .returning(|| Ok(FeedBatch::default()));
        feeds
            .expect_ferry_routes()
            .returning(|| Err(ApplicationError::Network("HTTP 500".to_string())));

        let mut sink = MockOutputSink::new();
        sink.expect_write().never();
        sink.expect_location()
            .returning(|| "out.kml".to_string());

        let service = ExportService::new(Arc::new(feeds), Arc::new(sink));
        let err = service.run_at(at()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Network(_)));
    }

    #[tokio::test]
    async fn test_oversized_document_rejected() {
        let mut sink = MockOutputSink::new();
        sink.expect_write().never();
        sink.expect_location()
            .returning(|| "out.kml".to_string());

        let service = ExportService::new(
            Arc::new(feeds(vec![event("EVT1", EventType::Weather)], vec![])),
            Arc::new(sink),
        )
        .with_config(ExportConfig {
            document_name: "Small".to_string(),
            max_bytes: 256,
        });

        let err = service.run_at(at()).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::OutputTooLarge { limit: 256, .. }
        ));
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let mut sink = MockOutputSink::new();
        sink.expect_write()
            .returning(|_| Err(ApplicationError::Write("disk full".to_string())));
        sink.expect_location()
            .returning(|| "out.kml".to_string());

        let service = ExportService::new(Arc::new(feeds(vec![], vec![])), Arc::new(sink));
        let err = service.run_at(at()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Write(_)));
    }

    #[test]
    fn test_summary_display() {
        let summary = ExportSummary {
            generated_at: at(),
            events: 3,
            ferries: 1,
            skipped: 2,
            categories: vec![
                (Category::Event(EventType::Construction), 3),
                (Category::Ferry(FerryType::OnDemand), 1),
            ],
            bytes: 4096,
            location: "drivebc_events.kml".to_string(),
        };

        let text = summary.to_string();
        assert!(text.starts_with(
            "Wrote 4 placemarks (3 events, 1 ferries) to drivebc_events.kml (4096 bytes)"
        ));
        assert!(text.contains("  Construction Events: 3\n"));
        assert!(text.contains("  On Demand Ferries: 1\n"));
        assert!(text.contains("  Skipped records: 2\n"));
    }
}
