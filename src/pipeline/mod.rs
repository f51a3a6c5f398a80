//! The dialogue pipeline: classify → resolve context → detect intent →
//! assemble → dispatch → persist.

pub mod assemble;
pub mod classify;
pub mod context;
pub mod gemini;
pub mod intent;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod types;

use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::enums::QueryCategory;
use self::gemini::BackendError;

impl QueryCategory {
    /// Localized message shown when generation fails for this category.
    pub fn generation_failure_message(&self) -> &'static str {
        match self {
            Self::Doctor => "Không thể tạo phản hồi cho truy vấn về bác sĩ.",
            Self::Specialty => "Không thể tạo phản hồi cho truy vấn về chuyên khoa.",
            Self::Clinic => "Không thể tạo phản hồi cho truy vấn về cơ sở y tế.",
            Self::General => "Không thể tạo phản hồi cho câu hỏi của bạn.",
        }
    }
}

/// Pipeline failures. Display strings are the user-facing localized messages;
/// internal detail stays on the source chain.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Thiếu thông tin tin nhắn")]
    MissingMessage,

    #[error("Đã xảy ra lỗi khi xử lý yêu cầu của bạn.")]
    History(#[source] DatabaseError),

    #[error("Không thể tìm kiếm thông tin bác sĩ.")]
    DoctorLookup(#[source] DatabaseError),

    #[error("Không thể tìm kiếm thông tin chuyên khoa.")]
    SpecialtyLookup(#[source] DatabaseError),

    #[error("Không thể tìm kiếm thông tin cơ sở y tế.")]
    ClinicLookup(#[source] DatabaseError),

    #[error("{}", .category.generation_failure_message())]
    Generation {
        category: QueryCategory,
        #[source]
        source: BackendError,
        /// Echoed for continuity: the caller's id, or — on the general path —
        /// a freshly generated one when none was supplied.
        session_id: Option<String>,
    },
}
