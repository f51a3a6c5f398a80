use chrono::Local;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::enums::QueryCategory;

use super::assemble::{
    assemble_clinic_payload, assemble_doctor_payload, assemble_specialty_payload,
};
use super::classify::classify_query;
use super::context::{
    has_been_greeted, lookback_window, render_transcript, resolve_doctor_reference,
};
use super::gemini::BackendError;
use super::intent::{detect_doctor_intent, detect_specialty_intent};
use super::prompt;
use super::session::SessionManager;
use super::types::{ChatReply, ChatRequest, ConversationContext, GeneralPayload, PersistenceOutcome};
use super::ChatError;

/// Trait for LLM text generation within the dialogue pipeline.
pub trait LlmGenerate {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, BackendError>;
}

/// Full dialogue pipeline orchestrator.
///
/// Coordinates: classify → resolve context → detect intent → assemble →
/// dispatch → persist. Stateless across requests: everything contextual is
/// re-read from the store per call.
pub struct ChatPipeline<'a, G: LlmGenerate> {
    generator: &'a G,
    conn: &'a Connection,
}

impl<'a, G: LlmGenerate> ChatPipeline<'a, G> {
    pub fn new(generator: &'a G, conn: &'a Connection) -> Self {
        Self { generator, conn }
    }

    /// Handle one user message end to end.
    ///
    /// On success the turn is appended to the session transcript
    /// best-effort: an append failure is logged, reported via
    /// `ChatReply::persistence`, and never fails the exchange.
    pub fn process(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::MissingMessage);
        }

        let category = classify_query(message);

        // Context is loaded only for continuing sessions.
        let history = match request.session_id.as_deref() {
            Some(session_id) => SessionManager::new(self.conn)
                .history(session_id)
                .map_err(ChatError::History)?,
            None => Vec::new(),
        };
        let window = lookback_window(&history);
        let context = ConversationContext {
            greeted: has_been_greeted(window),
            transcript: render_transcript(window),
        };

        // Anaphoric doctor references are rewritten against the full history
        // before intent detection and assembly.
        let query = if category == QueryCategory::Doctor {
            resolve_doctor_reference(message, &history)
        } else {
            message.to_string()
        };

        let today = Local::now().date_naive();
        let instruction = match category {
            QueryCategory::Doctor => {
                let intent = detect_doctor_intent(&query);
                let payload =
                    assemble_doctor_payload(self.conn, &query, intent, &context, today)?;
                prompt::doctor_instruction(&payload)
            }
            QueryCategory::Specialty => {
                let intent = detect_specialty_intent(&query);
                let payload =
                    assemble_specialty_payload(self.conn, &query, intent, &context)?;
                prompt::specialty_instruction(&payload)
            }
            QueryCategory::Clinic => {
                let payload = assemble_clinic_payload(self.conn, &query, &context)?;
                prompt::clinic_instruction(&payload)
            }
            QueryCategory::General => prompt::general_instruction(&GeneralPayload {
                query: query.clone(),
                greeted: context.greeted,
                transcript: context.transcript.clone(),
            }),
        };

        let response = self.dispatch(category, &instruction, &query, request)?;

        let session_id = request
            .session_id
            .clone()
            .unwrap_or_else(new_session_id);

        // Best-effort persistence of the original (un-rewritten) message.
        let persistence = match SessionManager::new(self.conn).append_turn(
            request.user_id,
            &session_id,
            message,
            &response,
            category,
        ) {
            Ok(turn) => PersistenceOutcome::Saved { turn_id: turn.id },
            Err(e) => {
                tracing::warn!(error = %e, session_id = %session_id, "Failed to persist chat turn");
                PersistenceOutcome::Failed
            }
        };

        Ok(ChatReply {
            response,
            session_id,
            persistence,
        })
    }

    /// Single synchronous backend exchange; the generated text is returned
    /// verbatim. No retries.
    fn dispatch(
        &self,
        category: QueryCategory,
        instruction: &str,
        query: &str,
        request: &ChatRequest,
    ) -> Result<String, ChatError> {
        let user_prompt = prompt::user_line(category, query);
        self.generator
            .generate(instruction, &user_prompt)
            .map_err(|source| ChatError::Generation {
                category,
                source,
                // The general path mints a continuity id even on failure;
                // the other categories echo whatever was supplied.
                session_id: match category {
                    QueryCategory::General => Some(
                        request.session_id.clone().unwrap_or_else(new_session_id),
                    ),
                    _ => request.session_id.clone(),
                },
            })
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
