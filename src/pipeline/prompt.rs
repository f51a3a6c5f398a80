//! Instruction templates, one per category. Each embeds the serialized
//! payload, the category's behavioral rules, the recent transcript window and
//! a do-not-re-greet clause when the user was already greeted.

use crate::models::enums::QueryCategory;

use super::types::{ClinicPayload, DoctorPayload, GeneralPayload, SpecialtyPayload};

const NO_REGREET_CLAUSE: &str =
    "Người dùng đã được chào hỏi trước đó, không chào lại nữa.";

pub fn doctor_instruction(payload: &DoctorPayload) -> String {
    let data = serde_json::to_string(&payload.doctors).unwrap_or_else(|_| "[]".into());

    let mut instruction = format!(
        "Bạn là một trợ lý ảo cho hệ thống đặt lịch khám bệnh.\n\
         Hãy tìm kiếm thông tin về bác sĩ dựa trên dữ liệu được cung cấp.\n\
         Dữ liệu bác sĩ: {data}\n\
         \n\
         Quy tắc trả lời theo dạng câu hỏi:\n\
         1. Hỏi thông tin chung về bác sĩ: nêu tên, chức danh, chuyên khoa và mô tả. \
         Nếu không tìm thấy bác sĩ phù hợp, hãy đề xuất tìm kiếm theo chuyên khoa hoặc cơ sở y tế.\n\
         2. Hỏi lịch khám: nêu ngày, khung giờ và số chỗ còn trống. \
         Nếu bác sĩ không có lịch khám trong những ngày tới, hãy gợi ý một bác sĩ khác cùng chuyên khoa.\n\
         3. Hỏi về đánh giá hoặc chất lượng: nêu điểm đánh giá và các nhận xét gần đây. \
         Nếu chưa có đánh giá nào, hãy nói rõ bác sĩ chưa được đánh giá.\n\
         4. Cần liệt kê nhiều bác sĩ: chọn 3-5 bác sĩ phù hợp nhất, không nêu giá khám.\n\
         5. Hỏi về giá khám: nêu mức giá kèm đơn vị. \
         Nếu chưa có thông tin giá, hãy hướng dẫn người dùng liên hệ phòng khám để biết chi phí.\n\
         Nếu câu hỏi nhắc đến một bác sĩ mà không xác định được là ai, hãy hỏi lại người dùng muốn nói đến bác sĩ nào.\n\
         Format trả lời ngắn gọn, dễ hiểu."
    );

    if let Some(filter) = payload.filter {
        instruction.push_str(&format!(
            "\nƯu tiên các bác sĩ theo tiêu chí: {}.",
            filter.as_str()
        ));
    }

    push_context_sections(
        &mut instruction,
        payload.greeted,
        payload.transcript.as_deref(),
    );
    instruction
}

pub fn specialty_instruction(payload: &SpecialtyPayload) -> String {
    let data = serde_json::to_string(&payload.specialties).unwrap_or_else(|_| "[]".into());

    let mut instruction = format!(
        "Bạn là một trợ lý ảo cho hệ thống đặt lịch khám bệnh.\n\
         Hãy tìm kiếm thông tin về chuyên khoa dựa trên dữ liệu được cung cấp.\n\
         Dữ liệu chuyên khoa: {data}\n\
         \n\
         Hãy cung cấp thông tin chi tiết về chuyên khoa phù hợp với yêu cầu tìm kiếm.\n\
         Nêu rõ tên chuyên khoa, mô tả và các dịch vụ chính.\n\
         Format trả lời ngắn gọn, dễ hiểu.\n\
         Nếu không tìm thấy chuyên khoa phù hợp, hãy đề xuất tìm kiếm theo bác sĩ hoặc cơ sở y tế."
    );

    if payload.filter.is_some() {
        instruction.push_str(
            "\nNgười dùng đang mô tả triệu chứng: hãy gợi ý chuyên khoa phù hợp nhất với \
             triệu chứng đó và giải thích ngắn gọn lý do.",
        );
    }

    push_context_sections(
        &mut instruction,
        payload.greeted,
        payload.transcript.as_deref(),
    );
    instruction
}

pub fn clinic_instruction(payload: &ClinicPayload) -> String {
    let data = serde_json::to_string(&payload.clinics).unwrap_or_else(|_| "[]".into());

    let mut instruction = format!(
        "Bạn là một trợ lý ảo cho hệ thống đặt lịch khám bệnh.\n\
         Hãy tìm kiếm thông tin về cơ sở y tế dựa trên dữ liệu được cung cấp.\n\
         Dữ liệu cơ sở y tế: {data}\n\
         \n\
         Hãy cung cấp thông tin chi tiết về cơ sở y tế phù hợp với yêu cầu tìm kiếm.\n\
         Nêu rõ tên cơ sở y tế, địa chỉ và mô tả.\n\
         Format trả lời ngắn gọn, dễ hiểu.\n\
         Nếu không tìm thấy cơ sở y tế phù hợp, hãy đề xuất tìm kiếm theo bác sĩ hoặc chuyên khoa."
    );

    push_context_sections(
        &mut instruction,
        payload.greeted,
        payload.transcript.as_deref(),
    );
    instruction
}

pub fn general_instruction(payload: &GeneralPayload) -> String {
    let mut instruction = String::from(
        "Bạn là một trợ lý ảo cho hệ thống đặt lịch khám bệnh.\n\
         Hãy trả lời câu hỏi chung về hệ thống đặt lịch khám bệnh.\n\
         Nếu người dùng có vẻ đang tìm kiếm thông tin, hãy gợi ý họ tìm kiếm theo bác sĩ, \
         chuyên khoa hoặc cơ sở y tế.\n\
         Ví dụ: \"Bạn có thể tìm kiếm bác sĩ [chuyên khoa], hoặc tìm thông tin về [chuyên khoa], \
         hoặc tìm kiếm cơ sở y tế [tên cơ sở].\"\n\
         Trả lời ngắn gọn, thân thiện và hữu ích.",
    );

    push_context_sections(
        &mut instruction,
        payload.greeted,
        payload.transcript.as_deref(),
    );
    instruction
}

/// The user-role line sent alongside the instruction.
pub fn user_line(category: QueryCategory, query: &str) -> String {
    match category {
        QueryCategory::Doctor => format!("Yêu cầu tìm kiếm bác sĩ: {query}"),
        QueryCategory::Specialty => format!("Yêu cầu tìm kiếm chuyên khoa: {query}"),
        QueryCategory::Clinic => format!("Yêu cầu tìm kiếm cơ sở y tế: {query}"),
        QueryCategory::General => format!("Câu hỏi: {query}"),
    }
}

fn push_context_sections(instruction: &mut String, greeted: bool, transcript: Option<&str>) {
    if let Some(transcript) = transcript {
        instruction.push_str("\n\nCuộc trò chuyện gần đây:\n");
        instruction.push_str(transcript);
    }
    if greeted {
        instruction.push('\n');
        instruction.push_str(NO_REGREET_CLAUSE);
    }
}
