//! Profile management state: the access gate, the loaded profile list, the
//! error slot and the three drafts (profile, pending location, pending bank
//! account).
//!
//! Every operation runs to completion, including its HTTP call, before the
//! next one starts. The list is never merged locally: each successful
//! mutation reloads it from the backend.

mod access;
mod drafts;

pub use access::{Access, ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE, DELETE_DENIED_MESSAGE};
pub use drafts::{
    BankForm, LocationForm, Tab, ValidationError, BANK_FIELDS_REQUIRED, LOCATION_FIELDS_REQUIRED,
};

use crate::api::{ApiError, ErrorKind, ProfileApi};
use crate::models::{CompanyProfile, CurrentUser, ProfileDraft};

pub const DELETE_CONFIRM_PROMPT: &str =
    "Are you sure you want to delete this company profile? This action cannot be undone.";

/// Asks the user before a destructive action.
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirmer for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// How a mutation ended. Failure details are in the error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    Failed,
    Denied,
}

/// What the profile list area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Denied,
    Loading,
    Empty,
    Profiles(&'a [CompanyProfile]),
}

struct Messages {
    rejected: &'static str,
    network: &'static str,
}

const LOAD: Messages = Messages {
    rejected: "Failed to load company profiles",
    network: "Network error loading profiles",
};
const FETCH: Messages = Messages {
    rejected: "Failed to load company profile",
    network: "Network error loading profile",
};
const CREATE: Messages = Messages {
    rejected: "Failed to create profile",
    network: "Network error creating profile",
};
const UPDATE: Messages = Messages {
    rejected: "Failed to update profile",
    network: "Network error updating profile",
};
const DELETE: Messages = Messages {
    rejected: "Failed to delete profile",
    network: "Network error deleting profile",
};

impl Messages {
    /// Server detail for rejected responses, fixed text otherwise.
    fn for_error(&self, err: &ApiError) -> String {
        match err.kind() {
            ErrorKind::Rejected => err.detail().unwrap_or(self.rejected).to_string(),
            ErrorKind::Transport => self.network.to_string(),
        }
    }
}

pub struct ProfileManager<A> {
    api: A,
    user: Option<CurrentUser>,
    access: Access,
    profiles: Vec<CompanyProfile>,
    loading: bool,
    error: Option<String>,
    editor_open: bool,
    editing: Option<String>,
    active_tab: Tab,
    draft: ProfileDraft,
    location_form: LocationForm,
    bank_form: BankForm,
}

impl<A: ProfileApi> ProfileManager<A> {
    /// Manager with no user: access is denied until one is set.
    pub fn new(api: A) -> Self {
        Self {
            api,
            user: None,
            access: Access::Denied,
            profiles: Vec::new(),
            loading: true,
            error: None,
            editor_open: false,
            editing: None,
            active_tab: Tab::default(),
            draft: ProfileDraft::new(),
            location_form: LocationForm::default(),
            bank_form: BankForm::default(),
        }
    }

    /// Manager for `user`; loads the list right away when access is granted.
    pub fn with_user(api: A, user: Option<CurrentUser>) -> Self {
        let mut manager = Self::new(api);
        manager.set_current_user(user);
        manager
    }

    /// Replace the current user and re-run the access check.
    pub fn set_current_user(&mut self, user: Option<CurrentUser>) -> Access {
        self.access = Access::check(user.as_ref());
        self.user = user;
        tracing::debug!("access for current user: {:?}", self.access);

        if self.access.is_granted() {
            self.load_profiles();
        }
        self.access
    }

    // ==================== STATE ====================

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn profiles(&self) -> &[CompanyProfile] {
        &self.profiles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("error slot: {}", message);
        self.error = Some(message);
    }

    pub fn view(&self) -> ListView<'_> {
        if !self.access.is_granted() {
            ListView::Denied
        } else if self.loading {
            ListView::Loading
        } else if self.profiles.is_empty() {
            ListView::Empty
        } else {
            ListView::Profiles(&self.profiles)
        }
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn set_company_name(&mut self, name: &str) {
        self.draft.company_name = name.trim().to_string();
    }

    pub fn set_company_logo(&mut self, logo: &str) {
        let logo = logo.trim();
        self.draft.company_logo = if logo.is_empty() {
            None
        } else {
            Some(logo.to_string())
        };
    }

    /// Replace the whole profile draft, e.g. with one read from a file.
    pub fn replace_draft(&mut self, draft: ProfileDraft) {
        self.draft = draft;
    }

    pub fn location_form(&self) -> &LocationForm {
        &self.location_form
    }

    pub fn location_form_mut(&mut self) -> &mut LocationForm {
        &mut self.location_form
    }

    pub fn bank_form(&self) -> &BankForm {
        &self.bank_form
    }

    pub fn bank_form_mut(&mut self) -> &mut BankForm {
        &mut self.bank_form
    }

    // ==================== LOADING ====================

    /// Fetch all profiles, replacing the list on success. Returns true on success.
    pub fn load_profiles(&mut self) -> bool {
        if !self.access.is_granted() {
            return false;
        }

        self.loading = true;
        let result = self.api.list_profiles();
        self.loading = false;

        match result {
            Ok(profiles) => {
                tracing::debug!("loaded {} company profiles", profiles.len());
                self.profiles = profiles;
                true
            }
            Err(err) => {
                self.report(&LOAD, &err);
                false
            }
        }
    }

    /// Fetch a single profile for the detail view.
    pub fn fetch_profile(&mut self, id: &str) -> Option<CompanyProfile> {
        if !self.access.is_granted() {
            return None;
        }
        match self.api.get_profile(id) {
            Ok(profile) => Some(profile),
            Err(err) => {
                self.report(&FETCH, &err);
                None
            }
        }
    }

    /// A profile from the loaded list, or fetched when not present.
    pub fn find_profile(&mut self, id: &str) -> Option<CompanyProfile> {
        match self.profiles.iter().find(|p| p.id == id) {
            Some(profile) => Some(profile.clone()),
            None => self.fetch_profile(id),
        }
    }

    fn report(&mut self, messages: &Messages, err: &ApiError) {
        if err.kind() == ErrorKind::Transport {
            tracing::error!("{}: {}", messages.network, err);
        }
        self.set_error(messages.for_error(err));
    }

    // ==================== EDITOR ====================

    pub fn open_create(&mut self) {
        self.editing = None;
        self.editor_open = true;
    }

    /// Seed the profile draft from an existing record and open the editor.
    pub fn start_edit(&mut self, profile: &CompanyProfile) {
        self.draft = profile.to_draft();
        self.editing = Some(profile.id.clone());
        self.editor_open = true;
    }

    /// Close the editor and discard all drafts.
    pub fn cancel_edit(&mut self) {
        self.editor_open = false;
        self.editing = None;
        self.reset_forms();
    }

    fn reset_forms(&mut self) {
        self.draft = ProfileDraft::new();
        self.location_form = LocationForm::default();
        self.bank_form = BankForm::default();
    }

    /// Validate the pending location and append it to the profile draft.
    pub fn add_location(&mut self) -> bool {
        match self.location_form.to_location() {
            Ok(location) => {
                self.draft.push_location(location);
                self.location_form = LocationForm::default();
                true
            }
            Err(err) => {
                tracing::debug!("location rejected, missing {:?}", err.missing);
                self.set_error(err.message);
                false
            }
        }
    }

    /// Validate the pending bank account and append it to the profile draft.
    pub fn add_bank_details(&mut self) -> bool {
        match self.bank_form.to_bank_account() {
            Ok(bank) => {
                self.draft.push_bank_account(bank);
                self.bank_form = BankForm::default();
                true
            }
            Err(err) => {
                tracing::debug!("bank account rejected, missing {:?}", err.missing);
                self.set_error(err.message);
                false
            }
        }
    }

    pub fn remove_location(&mut self, index: usize) {
        self.draft.remove_location(index);
    }

    pub fn remove_bank_details(&mut self, index: usize) {
        self.draft.remove_bank_account(index);
    }

    pub fn set_default_location(&mut self, index: usize) {
        self.draft.set_default_location(index);
    }

    pub fn set_default_bank(&mut self, index: usize) {
        self.draft.set_default_bank_account(index);
    }

    // ==================== MUTATIONS ====================

    /// Save the draft: update when editing an existing profile, create otherwise.
    pub fn submit(&mut self) -> Outcome {
        if self.editing.is_some() {
            self.update_profile()
        } else {
            self.create_profile()
        }
    }

    pub fn create_profile(&mut self) -> Outcome {
        if !self.access.is_granted() {
            self.set_error(ACCESS_DENIED_MESSAGE);
            return Outcome::Denied;
        }

        match self.api.create_profile(&self.draft) {
            Ok(receipt) => {
                tracing::info!(
                    "created company profile {}",
                    receipt.profile_id.as_deref().unwrap_or("(id not returned)")
                );
                self.finish_save();
                Outcome::Completed
            }
            Err(err) => {
                self.report(&CREATE, &err);
                Outcome::Failed
            }
        }
    }

    pub fn update_profile(&mut self) -> Outcome {
        if !self.access.is_granted() {
            self.set_error(ACCESS_DENIED_MESSAGE);
            return Outcome::Denied;
        }
        let Some(id) = self.editing.clone() else {
            self.set_error(UPDATE.rejected);
            return Outcome::Failed;
        };

        match self.api.update_profile(&id, &self.draft) {
            Ok(_) => {
                tracing::info!("updated company profile {}", id);
                self.finish_save();
                Outcome::Completed
            }
            Err(err) => {
                self.report(&UPDATE, &err);
                Outcome::Failed
            }
        }
    }

    fn finish_save(&mut self) {
        self.editor_open = false;
        self.editing = None;
        self.reset_forms();
        self.load_profiles();
    }

    /// Delete after confirmation. Super admins only.
    pub fn delete_profile(&mut self, id: &str, confirmer: &dyn Confirmer) -> Outcome {
        if !self.access.can_delete() {
            self.set_error(if self.access.is_granted() {
                DELETE_DENIED_MESSAGE
            } else {
                ACCESS_DENIED_MESSAGE
            });
            return Outcome::Denied;
        }

        if !confirmer.confirm(DELETE_CONFIRM_PROMPT) {
            return Outcome::Cancelled;
        }

        match self.api.delete_profile(id) {
            Ok(_) => {
                tracing::info!("deleted company profile {}", id);
                self.load_profiles();
                Outcome::Completed
            }
            Err(err) => {
                self.report(&DELETE, &err);
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, MutationReceipt};
    use crate::models::{BankAccount, Location};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// In-memory backend that records every call.
    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        lists: RefCell<VecDeque<ApiResult<Vec<CompanyProfile>>>>,
        mutations: RefCell<VecDeque<ApiResult<MutationReceipt>>>,
        bodies: RefCell<Vec<ProfileDraft>>,
    }

    impl FakeApi {
        fn with_lists(lists: Vec<ApiResult<Vec<CompanyProfile>>>) -> Self {
            Self {
                lists: RefCell::new(lists.into()),
                ..Self::default()
            }
        }

        fn then_mutation(self, result: ApiResult<MutationReceipt>) -> Self {
            self.mutations.borrow_mut().push_back(result);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
        }

        fn next_mutation(&self) -> ApiResult<MutationReceipt> {
            self.mutations
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(MutationReceipt::default()))
        }
    }

    impl ProfileApi for FakeApi {
        fn list_profiles(&self) -> ApiResult<Vec<CompanyProfile>> {
            self.calls.borrow_mut().push("list".into());
            self.lists.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }

        fn get_profile(&self, id: &str) -> ApiResult<CompanyProfile> {
            self.calls.borrow_mut().push(format!("get {}", id));
            Ok(profile(id, "Fetched"))
        }

        fn create_profile(&self, draft: &ProfileDraft) -> ApiResult<MutationReceipt> {
            self.calls.borrow_mut().push("create".into());
            self.bodies.borrow_mut().push(draft.clone());
            self.next_mutation()
        }

        fn update_profile(&self, id: &str, draft: &ProfileDraft) -> ApiResult<MutationReceipt> {
            self.calls.borrow_mut().push(format!("update {}", id));
            self.bodies.borrow_mut().push(draft.clone());
            self.next_mutation()
        }

        fn delete_profile(&self, id: &str) -> ApiResult<MutationReceipt> {
            self.calls.borrow_mut().push(format!("delete {}", id));
            self.next_mutation()
        }
    }

    fn profile(id: &str, name: &str) -> CompanyProfile {
        serde_json::from_value(serde_json::json!({"id": id, "company_name": name})).unwrap()
    }

    fn rejected(status: u16, detail: Option<&str>) -> ApiError {
        ApiError::Rejected {
            status,
            detail: detail.map(str::to_string),
        }
    }

    fn transport() -> ApiError {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err().into()
    }

    fn admin() -> Option<CurrentUser> {
        Some(CurrentUser::with_role("admin"))
    }

    fn super_admin() -> Option<CurrentUser> {
        Some(CurrentUser::with_role("super_admin"))
    }

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    fn fill_hq(manager: &mut ProfileManager<&FakeApi>) {
        let form = manager.location_form_mut();
        form.location_name = "HQ".to_string();
        form.address_line_1 = "1 Main St".to_string();
        form.city = "Pune".to_string();
    }

    // ==================== ACCESS ====================

    #[test]
    fn test_unprivileged_roles_make_no_requests() {
        for role in ["invoice_creator", "reviewer", "approver", "client", "vendor"] {
            let api = FakeApi::default();
            let mut manager =
                ProfileManager::with_user(&api, Some(CurrentUser::with_role(role)));

            assert_eq!(manager.access(), Access::Denied);
            assert_eq!(manager.view(), ListView::Denied);
            assert!(!manager.load_profiles());
            assert_eq!(manager.create_profile(), Outcome::Denied);
            assert_eq!(manager.delete_profile("p-1", &yes), Outcome::Denied);
            assert!(api.calls().is_empty(), "role {} issued {:?}", role, api.calls());
        }
    }

    #[test]
    fn test_no_user_is_denied() {
        let api = FakeApi::default();
        let manager = ProfileManager::with_user(&api, None);
        assert_eq!(manager.view(), ListView::Denied);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_user_change_reevaluates_access() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, Some(CurrentUser::with_role("reviewer")));
        assert!(api.calls().is_empty());

        assert_eq!(manager.set_current_user(admin()), Access::Granted { can_delete: false });
        assert_eq!(api.calls(), vec!["list"]);

        assert_eq!(manager.set_current_user(None), Access::Denied);
        assert_eq!(api.count("list"), 1);
    }

    // ==================== LOADING ====================

    #[test]
    fn test_starts_loading_before_first_fetch() {
        let api = FakeApi::default();
        let manager = ProfileManager::new(&api);
        assert!(manager.is_loading());
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        let api = FakeApi::with_lists(vec![Ok(Vec::new())]);
        let manager = ProfileManager::with_user(&api, admin());

        assert_eq!(manager.view(), ListView::Empty);
        assert!(!manager.is_loading());
        assert_eq!(manager.error(), None);
    }

    #[test]
    fn test_load_replaces_list() {
        let api = FakeApi::with_lists(vec![
            Ok(vec![profile("p-1", "Acme"), profile("p-2", "Globex")]),
            Ok(vec![profile("p-3", "Initech")]),
        ]);
        let mut manager = ProfileManager::with_user(&api, admin());
        assert_eq!(manager.profiles().len(), 2);

        assert!(manager.load_profiles());
        assert_eq!(manager.profiles(), &[profile("p-3", "Initech")]);
        assert!(matches!(manager.view(), ListView::Profiles(list) if list.len() == 1));
    }

    #[test]
    fn test_load_failures_use_fixed_messages() {
        let api = FakeApi::with_lists(vec![
            Ok(vec![profile("p-1", "Acme")]),
            Err(rejected(500, Some("database down"))),
            Err(transport()),
        ]);
        let mut manager = ProfileManager::with_user(&api, admin());

        assert!(!manager.load_profiles());
        assert_eq!(manager.error(), Some("Failed to load company profiles"));
        assert_eq!(manager.profiles().len(), 1);
        assert!(!manager.is_loading());

        assert!(!manager.load_profiles());
        assert_eq!(manager.error(), Some("Network error loading profiles"));

        manager.dismiss_error();
        assert_eq!(manager.error(), None);
    }

    #[test]
    fn test_find_profile_prefers_loaded_list() {
        let api = FakeApi::with_lists(vec![Ok(vec![profile("p-1", "Acme")])]);
        let mut manager = ProfileManager::with_user(&api, admin());

        assert_eq!(manager.find_profile("p-1").unwrap().company_name, "Acme");
        assert_eq!(api.count("get"), 0);

        assert_eq!(manager.find_profile("p-9").unwrap().company_name, "Fetched");
        assert_eq!(api.count("get p-9"), 1);
    }

    // ==================== DRAFT EDITORS ====================

    #[test]
    fn test_add_location_appends_and_resets_form() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        fill_hq(&mut manager);

        assert!(manager.add_location());
        let added = &manager.draft().locations[0];
        assert_eq!(added.location_name, "HQ");
        assert!(added.id.is_pending());
        assert!(!added.id.as_str().is_empty());
        assert_eq!(manager.location_form(), &LocationForm::default());
        assert_eq!(manager.location_form().country, "India");
        assert_eq!(manager.error(), None);
    }

    #[test]
    fn test_add_location_missing_city_rejected() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        fill_hq(&mut manager);
        manager.location_form_mut().city.clear();
        let form_before = manager.location_form().clone();

        assert!(!manager.add_location());
        assert!(manager.draft().locations.is_empty());
        assert_eq!(manager.error(), Some(LOCATION_FIELDS_REQUIRED));
        assert_eq!(manager.location_form(), &form_before);
    }

    #[test]
    fn test_add_bank_missing_ifsc_rejected() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        let form = manager.bank_form_mut();
        form.bank_name = "HDFC".to_string();
        form.account_number = "50100012345678".to_string();

        assert!(!manager.add_bank_details());
        assert!(manager.draft().bank_details.is_empty());
        assert_eq!(manager.error(), Some("Please fill in all required bank fields"));

        manager.bank_form_mut().ifsc_code = "HDFC0000001".to_string();
        assert!(manager.add_bank_details());
        assert_eq!(manager.draft().bank_details.len(), 1);
        assert_eq!(manager.bank_form(), &BankForm::default());
    }

    #[test]
    fn test_remove_and_set_default_through_manager() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        for name in ["A", "B", "C"] {
            let form = manager.location_form_mut();
            form.location_name = name.to_string();
            form.address_line_1 = "Road".to_string();
            form.city = "Pune".to_string();
            assert!(manager.add_location());
        }

        manager.set_default_location(2);
        manager.remove_location(0);
        let names: Vec<&str> = manager
            .draft()
            .locations
            .iter()
            .map(|l| l.location_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
        assert!(manager.draft().locations[1].is_default);

        manager.set_default_location(0);
        let defaults = manager.draft().locations.iter().filter(|l| l.is_default).count();
        assert_eq!(defaults, 1);
        assert!(manager.draft().locations[0].is_default);
    }

    #[test]
    fn test_tab_switch_leaves_drafts_alone() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        fill_hq(&mut manager);
        let draft = manager.draft().clone();
        let form = manager.location_form().clone();

        manager.set_active_tab(Tab::Banking);
        assert_eq!(manager.active_tab(), Tab::Banking);
        assert_eq!(manager.draft(), &draft);
        assert_eq!(manager.location_form(), &form);
    }

    // ==================== CREATE / UPDATE ====================

    #[test]
    fn test_create_success_resets_and_reloads_once() {
        let api = FakeApi::with_lists(vec![Ok(Vec::new()), Ok(vec![profile("p-1", "Acme")])])
            .then_mutation(Ok(MutationReceipt {
                message: None,
                profile_id: Some("p-1".into()),
            }));
        let mut manager = ProfileManager::with_user(&api, admin());

        manager.open_create();
        manager.set_company_name("Acme");
        fill_hq(&mut manager);
        assert!(manager.add_location());
        manager.bank_form_mut().bank_name = "half-typed".to_string();

        assert_eq!(manager.submit(), Outcome::Completed);
        assert_eq!(api.calls(), vec!["list", "create", "list"]);
        assert_eq!(api.bodies.borrow()[0].company_name, "Acme");
        assert_eq!(api.bodies.borrow()[0].locations.len(), 1);

        assert!(!manager.is_editor_open());
        assert!(manager.draft().is_empty());
        assert_eq!(manager.location_form(), &LocationForm::default());
        assert_eq!(manager.bank_form(), &BankForm::default());
        assert_eq!(manager.profiles().len(), 1);
    }

    #[test]
    fn test_create_failure_keeps_editor_and_drafts() {
        let api = FakeApi::default()
            .then_mutation(Err(rejected(400, Some("Only one location can be set as default"))))
            .then_mutation(Err(rejected(500, None)))
            .then_mutation(Err(transport()));
        let mut manager = ProfileManager::with_user(&api, admin());
        manager.open_create();
        manager.set_company_name("Acme");

        assert_eq!(manager.submit(), Outcome::Failed);
        assert_eq!(manager.error(), Some("Only one location can be set as default"));
        assert!(manager.is_editor_open());
        assert_eq!(manager.draft().company_name, "Acme");

        assert_eq!(manager.submit(), Outcome::Failed);
        assert_eq!(manager.error(), Some("Failed to create profile"));

        assert_eq!(manager.submit(), Outcome::Failed);
        assert_eq!(manager.error(), Some("Network error creating profile"));

        assert_eq!(api.count("create"), 3);
        assert_eq!(api.count("list"), 1);
    }

    #[test]
    fn test_start_edit_seeds_draft_and_update_targets_id() {
        let mut existing = profile("p-7", "Acme");
        existing.company_logo = Some(String::new());
        existing
            .bank_details
            .push(BankAccount::new("HDFC".into(), "1111".into(), "HDFC0000001".into()));

        let api = FakeApi::with_lists(vec![Ok(vec![existing.clone()])]);
        let mut manager = ProfileManager::with_user(&api, admin());

        manager.start_edit(&existing);
        assert!(manager.is_editor_open());
        assert_eq!(manager.editing_id(), Some("p-7"));
        assert_eq!(manager.draft().company_logo, None);
        assert_eq!(manager.draft().bank_details.len(), 1);

        manager.set_company_name("Acme Industries");
        assert_eq!(manager.submit(), Outcome::Completed);
        assert_eq!(api.calls(), vec!["list", "update p-7", "list"]);
        assert_eq!(api.bodies.borrow()[0].company_name, "Acme Industries");
        assert!(!manager.is_editor_open());
        assert_eq!(manager.editing_id(), None);
    }

    #[test]
    fn test_update_failure_messages() {
        let api = FakeApi::default()
            .then_mutation(Err(rejected(404, Some("Company profile not found"))))
            .then_mutation(Err(transport()));
        let mut manager = ProfileManager::with_user(&api, admin());
        manager.start_edit(&profile("p-1", "Acme"));

        assert_eq!(manager.submit(), Outcome::Failed);
        assert_eq!(manager.error(), Some("Company profile not found"));
        assert_eq!(manager.submit(), Outcome::Failed);
        assert_eq!(manager.error(), Some("Network error updating profile"));
        assert_eq!(manager.editing_id(), Some("p-1"));
    }

    #[test]
    fn test_cancel_edit_discards_drafts() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        manager.start_edit(&profile("p-1", "Acme"));
        fill_hq(&mut manager);

        manager.cancel_edit();
        assert!(!manager.is_editor_open());
        assert_eq!(manager.editing_id(), None);
        assert!(manager.draft().is_empty());
        assert_eq!(manager.location_form(), &LocationForm::default());
        assert_eq!(api.count("update"), 0);
    }

    #[test]
    fn test_replace_draft_then_create() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());
        let mut draft = ProfileDraft::new();
        draft.company_name = "Acme".to_string();
        draft.push_location(Location::new("HQ".into(), "1 Main St".into(), "Pune".into()));

        manager.replace_draft(draft.clone());
        assert_eq!(manager.create_profile(), Outcome::Completed);
        assert_eq!(api.bodies.borrow()[0], draft);
    }

    // ==================== DELETE ====================

    #[test]
    fn test_delete_requires_super_admin() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, admin());

        assert_eq!(manager.delete_profile("p-1", &yes), Outcome::Denied);
        assert_eq!(manager.error(), Some(DELETE_DENIED_MESSAGE));
        assert_eq!(api.count("delete"), 0);
    }

    #[test]
    fn test_delete_declined_sends_nothing() {
        let api = FakeApi::with_lists(vec![Ok(vec![profile("p-1", "Acme")])]);
        let mut manager = ProfileManager::with_user(&api, super_admin());

        assert_eq!(manager.delete_profile("p-1", &no), Outcome::Cancelled);
        assert_eq!(api.calls(), vec!["list"]);
        assert_eq!(manager.profiles().len(), 1);
    }

    #[test]
    fn test_delete_asks_with_fixed_prompt() {
        let api = FakeApi::default();
        let mut manager = ProfileManager::with_user(&api, super_admin());
        let asked = RefCell::new(Vec::new());
        let confirmer = |prompt: &str| {
            asked.borrow_mut().push(prompt.to_string());
            true
        };

        assert_eq!(manager.delete_profile("p-1", &confirmer), Outcome::Completed);
        assert_eq!(asked.borrow().as_slice(), &[DELETE_CONFIRM_PROMPT.to_string()]);
        assert_eq!(api.calls(), vec!["list", "delete p-1", "list"]);
    }

    #[test]
    fn test_delete_not_found_keeps_list() {
        let api = FakeApi::with_lists(vec![Ok(vec![profile("p-1", "Acme")])])
            .then_mutation(Err(rejected(404, Some("Not found"))));
        let mut manager = ProfileManager::with_user(&api, super_admin());

        assert_eq!(manager.delete_profile("p-1", &yes), Outcome::Failed);
        assert_eq!(manager.error(), Some("Not found"));
        assert_eq!(manager.profiles(), &[profile("p-1", "Acme")]);
        assert_eq!(api.count("list"), 1);
    }

    #[test]
    fn test_delete_transport_failure() {
        let api = FakeApi::default().then_mutation(Err(transport()));
        let mut manager = ProfileManager::with_user(&api, super_admin());

        assert_eq!(manager.delete_profile("p-1", &yes), Outcome::Failed);
        assert_eq!(manager.error(), Some("Network error deleting profile"));
    }

    #[test]
    fn test_new_error_replaces_previous() {
        let api = FakeApi::default().then_mutation(Err(rejected(400, Some("Bad"))));
        let mut manager = ProfileManager::with_user(&api, admin());
        assert!(!manager.add_location());
        assert_eq!(manager.error(), Some(LOCATION_FIELDS_REQUIRED));

        assert_eq!(manager.create_profile(), Outcome::Failed);
        assert_eq!(manager.error(), Some("Bad"));
    }
}
