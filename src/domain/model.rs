use std::fmt;
use std::time::Duration;

/// What happened to a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    HttpError { status: u16 },
    TransportError { message: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page: u32,
    pub outcome: FetchOutcome,
}

impl PageReport {
    pub fn new(page: u32, outcome: FetchOutcome) -> Self {
        Self { page, outcome }
    }
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FetchOutcome::Success => write!(f, "Page {} fetched successfully", self.page),
            FetchOutcome::HttpError { status } => {
                write!(f, "Page {} failed with status code {}", self.page, status)
            }
            FetchOutcome::TransportError { message } => {
                write!(f, "Error fetching page {}: {}", self.page, message)
            }
        }
    }
}

/// Reports are kept in completion order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub reports: Vec<PageReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.reports.len() - self.success_count()
    }

    /// The closing stdout line: elapsed wall-clock seconds.
    pub fn elapsed_line(&self) -> String {
        self.elapsed.as_secs_f64().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        assert_eq!(
            PageReport::new(3, FetchOutcome::Success).to_string(),
            "Page 3 fetched successfully"
        );
        assert_eq!(
            PageReport::new(10, FetchOutcome::HttpError { status: 500 }).to_string(),
            "Page 10 failed with status code 500"
        );
        assert_eq!(
            PageReport::new(
                30,
                FetchOutcome::TransportError {
                    message: "operation timed out".to_string()
                }
            )
            .to_string(),
            "Error fetching page 30: operation timed out"
        );
    }

    #[test]
    fn test_batch_counts() {
        let batch = BatchReport {
            reports: vec![
                PageReport::new(1, FetchOutcome::Success),
                PageReport::new(2, FetchOutcome::HttpError { status: 404 }),
                PageReport::new(3, FetchOutcome::Success),
            ],
            elapsed: Duration::from_millis(1500),
        };

        assert_eq!(batch.success_count(), 2);
        assert_eq!(batch.failure_count(), 1);
        assert_eq!(batch.elapsed_line(), "1.5");
    }
}
