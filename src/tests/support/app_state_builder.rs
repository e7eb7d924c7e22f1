use std::sync::Arc;

use actix_web::web;

use crate::modules::auth::application::auth_use_cases::AuthUseCases;
use crate::modules::cdn::application::cdn_use_cases::CdnUseCases;
use crate::modules::course::application::course_use_cases::CourseUseCases;
use crate::modules::email::application::mail_use_cases::MailUseCases;
use crate::modules::payment::application::payment_use_cases::PaymentUseCases;
use crate::modules::progress::application::progress_use_cases::ProgressUseCases;
use crate::modules::purchase::application::purchase_use_cases::PurchaseUseCases;
use crate::modules::review::application::review_use_cases::ReviewUseCases;
use crate::modules::user::application::user_use_cases::UserUseCases;
use crate::tests::support::stubs::NotUsed;
use crate::AppState;

/// Builds an `AppState` where every use case is `NotUsed` until a test
/// swaps in its own.
///
/// ```ignore
/// TestAppStateBuilder::default()
///     .review(|uc| uc.get = Arc::new(FixedGet(Ok(review))))
///     .build()
/// ```
pub struct TestAppStateBuilder {
    auth: AuthUseCases,
    user: UserUseCases,
    course: CourseUseCases,
    purchase: PurchaseUseCases,
    payment: PaymentUseCases,
    progress: ProgressUseCases,
    review: ReviewUseCases,
    cdn: CdnUseCases,
    mail: MailUseCases,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let stub = Arc::new(NotUsed);
        Self {
            auth: AuthUseCases {
                register: stub.clone(),
                login: stub.clone(),
                refresh: stub.clone(),
                logout: stub.clone(),
                request_password_reset: stub.clone(),
                verify_reset_token: stub.clone(),
                reset_password: stub.clone(),
            },
            user: UserUseCases {
                list: stub.clone(),
                get_profile: stub.clone(),
                update_profile: stub.clone(),
                upload_image: stub.clone(),
            },
            course: CourseUseCases {
                list: stub.clone(),
                get: stub.clone(),
                purchased: stub.clone(),
                user_course: stub.clone(),
                user_module: stub.clone(),
                user_lesson: stub.clone(),
            },
            purchase: PurchaseUseCases {
                purchase: stub.clone(),
            },
            payment: PaymentUseCases {
                create: stub.clone(),
                status: stub.clone(),
                verify_webhook: stub.clone(),
                apply_update: stub.clone(),
            },
            progress: ProgressUseCases {
                update_position: stub.clone(),
                complete_lesson: stub.clone(),
                complete_module: stub.clone(),
            },
            review: ReviewUseCases {
                list: stub.clone(),
                list_for_course: stub.clone(),
                get: stub.clone(),
                create: stub.clone(),
                update: stub.clone(),
                delete: stub.clone(),
            },
            cdn: CdnUseCases {
                upload: stub.clone(),
                serve_public: stub.clone(),
                serve_video: stub.clone(),
            },
            mail: MailUseCases { send: stub },
        }
    }
}

impl TestAppStateBuilder {
    pub fn auth(mut self, f: impl FnOnce(&mut AuthUseCases)) -> Self {
        f(&mut self.auth);
        self
    }

    pub fn user(mut self, f: impl FnOnce(&mut UserUseCases)) -> Self {
        f(&mut self.user);
        self
    }

    pub fn course(mut self, f: impl FnOnce(&mut CourseUseCases)) -> Self {
        f(&mut self.course);
        self
    }

    pub fn purchase(mut self, f: impl FnOnce(&mut PurchaseUseCases)) -> Self {
        f(&mut self.purchase);
        self
    }

    pub fn payment(mut self, f: impl FnOnce(&mut PaymentUseCases)) -> Self {
        f(&mut self.payment);
        self
    }

    pub fn progress(mut self, f: impl FnOnce(&mut ProgressUseCases)) -> Self {
        f(&mut self.progress);
        self
    }

    pub fn review(mut self, f: impl FnOnce(&mut ReviewUseCases)) -> Self {
        f(&mut self.review);
        self
    }

    pub fn cdn(mut self, f: impl FnOnce(&mut CdnUseCases)) -> Self {
        f(&mut self.cdn);
        self
    }

    pub fn mail(mut self, f: impl FnOnce(&mut MailUseCases)) -> Self {
        f(&mut self.mail);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            auth: self.auth,
            user: self.user,
            course: self.course,
            purchase: self.purchase,
            payment: self.payment,
            progress: self.progress,
            review: self.review,
            cdn: self.cdn,
            mail: self.mail,
        })
    }
}
